use crate::core::preset::{Pipeline, Preset, VideoCodec};

const INPUT_FILE_H264: &str = "/media/1080p.25fps.4M.264";
const INPUT_FILE_H265: &str = "/media/1080p.25fps.3M.265";
const INPUT_STREAM_H264: &str = "rtsp://192.168.91.64/live/h264";
const INPUT_STREAM_H265: &str = "rtsp://192.168.91.64/live/h265";

const OUTPUT_FILE_H264: &str = "/media/outputs/{label}_{index}.25fps.264";
const OUTPUT_FILE_H265: &str = "/media/outputs/{label}_{index}.25fps.265";
const OUTPUT_STREAM_H264: &str = "rtsp://192.168.91.64/my/h264/{label}/{index}";
const OUTPUT_STREAM_H265: &str = "rtsp://192.168.91.64/my/h265/{label}/{index}";

/// Destination path or URL with `{label}` and `{index}` placeholders, rendered
/// once per output branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestTemplate {
    raw: &'static str,
}

impl DestTemplate {
    pub fn render(&self, label: &str, index: u32) -> String {
        self.raw
            .replace("{label}", label)
            .replace("{index}", &index.to_string())
    }

    pub fn raw(&self) -> &'static str {
        self.raw
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub template: DestTemplate,
    pub format: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub source: &'static str,
    pub destination: Option<Destination>,
    pub warning: Option<String>,
}

/// Resolves the concrete source and destination for a preset. Pure: the
/// tolerant stream-combination error comes back as `warning` for the caller
/// to log.
pub fn resolve(preset: Preset, input_net_stream: bool, output_net_stream: bool) -> Route {
    let source = match (preset.decode_family(), input_net_stream) {
        (VideoCodec::H264, false) => INPUT_FILE_H264,
        (VideoCodec::H264, true) => INPUT_STREAM_H264,
        (VideoCodec::H265, false) => INPUT_FILE_H265,
        (VideoCodec::H265, true) => INPUT_STREAM_H265,
    };

    let (destination, warning) = match preset.pipeline() {
        Pipeline::DecodeOnly => {
            let warning = output_net_stream.then(|| {
                format!(
                    "output_net_stream is not supported for preset '{preset}', keeping the null sink"
                )
            });
            (None, warning)
        }
        Pipeline::SingleTier { codec, .. } | Pipeline::DualTier { codec } => {
            (Some(destination_for(codec, output_net_stream)), None)
        }
    };

    Route {
        source,
        destination,
        warning,
    }
}

fn destination_for(codec: VideoCodec, output_net_stream: bool) -> Destination {
    match (codec, output_net_stream) {
        (VideoCodec::H264, false) => Destination {
            template: DestTemplate {
                raw: OUTPUT_FILE_H264,
            },
            format: "h264",
        },
        (VideoCodec::H264, true) => Destination {
            template: DestTemplate {
                raw: OUTPUT_STREAM_H264,
            },
            format: "rtsp",
        },
        (VideoCodec::H265, false) => Destination {
            template: DestTemplate {
                raw: OUTPUT_FILE_H265,
            },
            format: "hevc",
        },
        (VideoCodec::H265, true) => Destination {
            template: DestTemplate {
                raw: OUTPUT_STREAM_H265,
            },
            format: "rtsp",
        },
    }
}
