use crate::core::preset::{Pipeline, Preset, Tier, VideoCodec, DUAL_TIER_FILTER};
use crate::core::route::{Destination, Route};
use crate::core::RunConfig;

/// Builds the full argument vector for one job: container prefix, input
/// options, source, then the preset-specific encoding tail. Pure function of
/// its arguments; the scratch-directory clear is owned by the batch runner.
pub fn build_args(config: &RunConfig, preset: Preset, route: &Route, index: u32) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "docker".to_string(),
        "run".to_string(),
        "-it".to_string(),
        "-v".to_string(),
        format!("{}:/media", config.media_root.display()),
        config.image.clone(),
        "-nostdin".to_string(),
    ];

    if config.read_rate {
        push_all(&mut args, &["-re", "-threads", "1"]);
    }

    if config.input_net_stream {
        push_all(&mut args, &["-rtsp_transport", "tcp", "-t"]);
        args.push(config.timeout_seconds.to_string());
    }

    args.push("-i".to_string());
    args.push(route.source.to_string());

    match preset.pipeline() {
        Pipeline::DecodeOnly => {
            push_all(&mut args, &["-f", "null", "-"]);
        }
        Pipeline::SingleTier { codec, tier } => {
            if let Some(dest) = &route.destination {
                push_single_tier(&mut args, codec, tier, dest, index);
            }
        }
        Pipeline::DualTier { codec } => {
            if let Some(dest) = &route.destination {
                push_dual_tier(&mut args, codec, dest, index);
            }
        }
    }

    args
}

fn push_single_tier(
    args: &mut Vec<String>,
    codec: VideoCodec,
    tier: Tier,
    dest: &Destination,
    index: u32,
) {
    push_all(
        args,
        &[
            "-vf",
            tier.scale_filter(),
            "-filter_threads",
            "1",
            "-threads",
            "1",
            "-c:v",
            codec.encoder(),
            "-b:v",
            tier.bitrate(),
        ],
    );
    push_encoder_opts(args);
    push_all(args, &["-f", dest.format]);
    args.push(dest.template.render(tier.label(), index));
}

fn push_dual_tier(args: &mut Vec<String>, codec: VideoCodec, dest: &Destination, index: u32) {
    push_all(
        args,
        &[
            "-filter_complex",
            DUAL_TIER_FILTER,
            "-filter_complex_threads",
            "2",
            "-threads",
            "2",
        ],
    );
    for (branch, pad, tier) in [(0, "[b1]", Tier::High), (1, "[b2]", Tier::Low)] {
        args.push("-map".to_string());
        args.push(pad.to_string());
        args.push(format!("-c:v:{branch}"));
        args.push(codec.encoder().to_string());
        args.push(format!("-b:v:{branch}"));
        args.push(tier.bitrate().to_string());
        push_encoder_opts(args);
        push_all(args, &["-f", dest.format]);
        args.push(dest.template.render(tier.label(), index));
    }
}

fn push_encoder_opts(args: &mut Vec<String>) {
    push_all(
        args,
        &[
            "-bf",
            "0",
            "-g",
            "50",
            "-preset",
            "ultrafast",
            "-tune",
            "zerolatency",
        ],
    );
}

fn push_all(args: &mut Vec<String>, flags: &[&str]) {
    args.extend(flags.iter().map(|flag| flag.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::route::resolve;

    fn config() -> RunConfig {
        RunConfig::default()
    }

    fn build(config: &RunConfig, preset: Preset, index: u32) -> Vec<String> {
        let route = resolve(preset, config.input_net_stream, config.output_net_stream);
        build_args(config, preset, &route, index)
    }

    fn count(args: &[String], needle: &str) -> usize {
        args.iter().filter(|arg| arg.as_str() == needle).count()
    }

    #[test]
    fn every_preset_names_its_source_exactly_once() {
        let config = config();
        for preset in Preset::ALL {
            let route = resolve(preset, false, false);
            let args = build_args(&config, preset, &route, 0);
            assert!(!args.is_empty());
            assert_eq!(count(&args, route.source), 1, "preset {preset}");
        }
    }

    #[test]
    fn every_preset_renders_each_destination_branch_exactly_once() {
        let config = config();
        for preset in Preset::ALL {
            let route = resolve(preset, false, false);
            let args = build_args(&config, preset, &route, 5);
            match preset.pipeline() {
                Pipeline::DecodeOnly => {
                    assert_eq!(&args[args.len() - 3..], &["-f", "null", "-"], "preset {preset}");
                }
                Pipeline::SingleTier { tier, .. } => {
                    let dest = route.destination.unwrap();
                    let rendered = dest.template.render(tier.label(), 5);
                    assert_eq!(count(&args, &rendered), 1, "preset {preset}");
                }
                Pipeline::DualTier { .. } => {
                    let dest = route.destination.unwrap();
                    for tier in [Tier::High, Tier::Low] {
                        let rendered = dest.template.render(tier.label(), 5);
                        assert_eq!(count(&args, &rendered), 1, "preset {preset}");
                    }
                }
            }
        }
    }

    #[test]
    fn container_prefix_comes_first() {
        let args = build(&config(), Preset::D264Only, 0);
        assert_eq!(
            &args[..7],
            &[
                "docker",
                "run",
                "-it",
                "-v",
                "/tmp:/media",
                "linuxserver/ffmpeg",
                "-nostdin"
            ]
        );
    }

    #[test]
    fn media_root_changes_the_mount() {
        let mut config = config();
        config.media_root = "/var/bench".into();
        let args = build(&config, Preset::D264Only, 0);
        assert!(args.contains(&"/var/bench:/media".to_string()));
    }

    #[test]
    fn decode_only_ends_with_a_null_sink() {
        let args = build(&config(), Preset::D265Only, 0);
        assert_eq!(&args[args.len() - 3..], &["-f", "null", "-"]);
        assert_eq!(count(&args, "-c:v"), 0);
    }

    #[test]
    fn decode_only_keeps_the_null_sink_when_network_output_is_requested() {
        let mut config = config();
        config.output_net_stream = true;
        let args = build(&config, Preset::D264Only, 0);
        assert_eq!(&args[args.len() - 3..], &["-f", "null", "-"]);
    }

    #[test]
    fn single_tier_renders_one_destination() {
        let args = build(&config(), Preset::De264ToHigh264, 2);
        assert_eq!(count(&args, "/media/outputs/high_2.25fps.264"), 1);
        assert_eq!(count(&args, "-c:v"), 1);
        assert_eq!(count(&args, "libx264"), 1);
        assert!(args.contains(&"scale=720:480".to_string()));
        assert!(args.contains(&"1M".to_string()));
    }

    #[test]
    fn dual_tier_renders_two_branches_with_distinct_labels() {
        let args = build(&config(), Preset::De265To264, 7);
        assert_eq!(count(&args, "/media/outputs/high_7.25fps.264"), 1);
        assert_eq!(count(&args, "/media/outputs/low_7.25fps.264"), 1);
        assert_eq!(count(&args, "[b1]"), 1);
        assert_eq!(count(&args, "[b2]"), 1);
        assert_eq!(count(&args, "libx264"), 2);
        assert_eq!(count(&args, "-filter_complex"), 1);
    }

    #[test]
    fn job_index_disambiguates_destinations() {
        let first = build(&config(), Preset::De264To264, 0);
        let second = build(&config(), Preset::De264To264, 1);
        assert!(first.contains(&"/media/outputs/high_0.25fps.264".to_string()));
        assert!(second.contains(&"/media/outputs/high_1.25fps.264".to_string()));
    }

    #[test]
    fn read_rate_inserts_pacing_flags_before_the_input() {
        let mut config = config();
        config.read_rate = true;
        let args = build(&config, Preset::D264Only, 0);
        let re = args.iter().position(|arg| arg == "-re").unwrap();
        let input = args.iter().position(|arg| arg == "-i").unwrap();
        assert!(re < input);
        assert_eq!(&args[re..re + 3], &["-re", "-threads", "1"]);

        config.read_rate = false;
        assert_eq!(count(&build(&config, Preset::D264Only, 0), "-re"), 0);
    }

    #[test]
    fn network_input_adds_transport_and_timeout() {
        let mut config = config();
        config.input_net_stream = true;
        config.timeout_seconds = 90;
        let args = build(&config, Preset::De265To265, 0);
        let transport = args.iter().position(|arg| arg == "-rtsp_transport").unwrap();
        assert_eq!(&args[transport..transport + 4], &["-rtsp_transport", "tcp", "-t", "90"]);
        assert_eq!(count(&args, "rtsp://192.168.91.64/live/h265"), 1);
    }

    #[test]
    fn network_output_streams_both_branches() {
        let mut config = config();
        config.output_net_stream = true;
        let args = build(&config, Preset::De264To264, 4);
        assert_eq!(count(&args, "rtsp://192.168.91.64/my/h264/high/4"), 1);
        assert_eq!(count(&args, "rtsp://192.168.91.64/my/h264/low/4"), 1);
        assert_eq!(count(&args, "rtsp"), 2);
    }

    #[test]
    fn encoder_opts_repeat_per_branch() {
        let args = build(&config(), Preset::De265To265, 0);
        assert_eq!(count(&args, "-bf"), 2);
        assert_eq!(count(&args, "ultrafast"), 2);
        assert_eq!(count(&args, "zerolatency"), 2);

        let single = build(&config(), Preset::De265ToLow265, 0);
        assert_eq!(count(&single, "-bf"), 1);
        assert_eq!(count(&single, "128K"), 1);
    }
}
