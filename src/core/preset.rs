use std::fmt;
use std::str::FromStr;

use crate::core::error::BenchError;

/// Split graph feeding both tiers of a dual-tier preset from one decoded stream.
pub const DUAL_TIER_FILTER: &str =
    "[0:v]split=2[v1][v2];[v1]scale=720:480,setsar=1[b1];[v2]scale=352:288,setsar=1[b2]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCodec {
    H264,
    H265,
}

impl VideoCodec {
    pub fn encoder(self) -> &'static str {
        match self {
            VideoCodec::H264 => "libx264",
            VideoCodec::H265 => "libx265",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    High,
    Low,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::High => "high",
            Tier::Low => "low",
        }
    }

    pub fn scale_filter(self) -> &'static str {
        match self {
            Tier::High => "scale=720:480",
            Tier::Low => "scale=352:288",
        }
    }

    pub fn bitrate(self) -> &'static str {
        match self {
            Tier::High => "1M",
            Tier::Low => "128K",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    DecodeOnly,
    SingleTier { codec: VideoCodec, tier: Tier },
    DualTier { codec: VideoCodec },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    De264To264,
    De265To265,
    De265To264,
    De264ToHigh264,
    De264ToLow264,
    De265ToHigh265,
    De265ToLow265,
    De265ToHigh264,
    De265ToLow264,
    D264Only,
    D265Only,
}

impl Preset {
    pub const ALL: [Preset; 11] = [
        Preset::De264To264,
        Preset::De265To265,
        Preset::De265To264,
        Preset::De264ToHigh264,
        Preset::De264ToLow264,
        Preset::De265ToHigh265,
        Preset::De265ToLow265,
        Preset::De265ToHigh264,
        Preset::De265ToLow264,
        Preset::D264Only,
        Preset::D265Only,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Preset::De264To264 => "de_264_to_264",
            Preset::De265To265 => "de_265_to_265",
            Preset::De265To264 => "de_265_to_264",
            Preset::De264ToHigh264 => "de_264_to_high_264",
            Preset::De264ToLow264 => "de_264_to_low_264",
            Preset::De265ToHigh265 => "de_265_to_high_265",
            Preset::De265ToLow265 => "de_265_to_low_265",
            Preset::De265ToHigh264 => "de_265_to_high_264",
            Preset::De265ToLow264 => "de_265_to_low_264",
            Preset::D264Only => "d_264_only",
            Preset::D265Only => "d_265_only",
        }
    }

    /// Codec family of the input stream, selecting the source.
    pub fn decode_family(self) -> VideoCodec {
        match self {
            Preset::De264To264
            | Preset::De264ToHigh264
            | Preset::De264ToLow264
            | Preset::D264Only => VideoCodec::H264,
            Preset::De265To265
            | Preset::De265To264
            | Preset::De265ToHigh265
            | Preset::De265ToLow265
            | Preset::De265ToHigh264
            | Preset::De265ToLow264
            | Preset::D265Only => VideoCodec::H265,
        }
    }

    /// Shape of the encoding stage, carrying the encode codec where one exists.
    pub fn pipeline(self) -> Pipeline {
        match self {
            Preset::De264To264 => Pipeline::DualTier {
                codec: VideoCodec::H264,
            },
            Preset::De265To265 => Pipeline::DualTier {
                codec: VideoCodec::H265,
            },
            Preset::De265To264 => Pipeline::DualTier {
                codec: VideoCodec::H264,
            },
            Preset::De264ToHigh264 => Pipeline::SingleTier {
                codec: VideoCodec::H264,
                tier: Tier::High,
            },
            Preset::De264ToLow264 => Pipeline::SingleTier {
                codec: VideoCodec::H264,
                tier: Tier::Low,
            },
            Preset::De265ToHigh265 => Pipeline::SingleTier {
                codec: VideoCodec::H265,
                tier: Tier::High,
            },
            Preset::De265ToLow265 => Pipeline::SingleTier {
                codec: VideoCodec::H265,
                tier: Tier::Low,
            },
            Preset::De265ToHigh264 => Pipeline::SingleTier {
                codec: VideoCodec::H264,
                tier: Tier::High,
            },
            Preset::De265ToLow264 => Pipeline::SingleTier {
                codec: VideoCodec::H264,
                tier: Tier::Low,
            },
            Preset::D264Only | Preset::D265Only => Pipeline::DecodeOnly,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::De264To264 => "decode H.264, encode both tiers to H.264",
            Preset::De265To265 => "decode H.265, encode both tiers to H.265",
            Preset::De265To264 => "decode H.265, encode both tiers to H.264",
            Preset::De264ToHigh264 => "decode H.264, encode high tier to H.264",
            Preset::De264ToLow264 => "decode H.264, encode low tier to H.264",
            Preset::De265ToHigh265 => "decode H.265, encode high tier to H.265",
            Preset::De265ToLow265 => "decode H.265, encode low tier to H.265",
            Preset::De265ToHigh264 => "decode H.265, encode high tier to H.264",
            Preset::De265ToLow264 => "decode H.265, encode low tier to H.264",
            Preset::D264Only => "decode H.264 only, output discarded",
            Preset::D265Only => "decode H.265 only, output discarded",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Preset {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .iter()
            .copied()
            .find(|preset| preset.id() == s)
            .ok_or_else(|| BenchError::UnknownPreset { id: s.to_string() })
    }
}
