use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::core::error::BenchError;
use crate::core::preset::Preset;
use crate::core::runlog::RunLog;
use crate::core::runner;
use crate::core::RunConfig;

/// The run log lands in the working directory, named after the binary.
pub const LOG_FILE: &str = "ffbench.log";

#[derive(Debug, Parser)]
#[command(name = "ffbench", version, about = "Batch ffmpeg transcode benchmark runner")]
pub struct Cli {
    /// Debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build and execute one transcode batch
    Run(RunArgs),
    /// List the known presets
    Presets,
}

#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Preset id selecting the encoding template
    #[arg(long, default_value = "de_264_only")]
    pub output_type: String,
    /// Pace input reads to real time
    #[arg(long)]
    pub read_rate: bool,
    /// Batch fan-out, one subprocess per job
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_processes: u32,
    /// Read the source from the network instead of a file
    #[arg(long)]
    pub input_net_stream: bool,
    /// Send output to the network instead of a file
    #[arg(long)]
    pub output_net_stream: bool,
    /// Network input read limit, in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout_seconds: u32,
    /// Build and log the first command without spawning anything
    #[arg(long)]
    pub dry: bool,
    /// Host directory mounted at /media inside the container
    #[arg(long, default_value = "/tmp")]
    pub media_root: PathBuf,
    /// Toolchain container image
    #[arg(long, default_value = "linuxserver/ffmpeg")]
    pub image: String,
}

pub fn execute(cli: Cli) -> Result<(), BenchError> {
    match cli.command {
        Commands::Run(args) => run_command(args),
        Commands::Presets => {
            print_presets();
            Ok(())
        }
    }
}

fn run_command(args: RunArgs) -> Result<(), BenchError> {
    let config = run_args_to_config(args);
    debug!(?config, "run configuration");

    let log = RunLog::open(Path::new(LOG_FILE))?;
    log.info(&format!("invocation: {}", shell_words::join(std::env::args())));

    runner::run_batch(&config, &log)?;
    Ok(())
}

fn run_args_to_config(args: RunArgs) -> RunConfig {
    RunConfig {
        output_type: args.output_type,
        read_rate: args.read_rate,
        max_processes: args.max_processes,
        input_net_stream: args.input_net_stream,
        output_net_stream: args.output_net_stream,
        timeout_seconds: args.timeout_seconds,
        dry: args.dry,
        media_root: args.media_root,
        image: args.image,
    }
}

fn print_presets() {
    for preset in Preset::ALL {
        println!("{:<20} {}", preset.id(), preset.description());
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn clap_surface_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults_mirror_the_config_defaults() {
        let cli = Cli::try_parse_from(["ffbench", "run"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        let config = run_args_to_config(args);
        let defaults = RunConfig::default();
        assert_eq!(config.output_type, defaults.output_type);
        assert_eq!(config.max_processes, defaults.max_processes);
        assert_eq!(config.timeout_seconds, defaults.timeout_seconds);
        assert_eq!(config.media_root, defaults.media_root);
        assert_eq!(config.image, defaults.image);
        assert!(!config.read_rate && !config.dry);
        assert!(!config.input_net_stream && !config.output_net_stream);
    }

    #[test]
    fn zero_fan_out_is_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["ffbench", "run", "--max-processes", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn flags_parse_into_the_config() {
        let cli = Cli::try_parse_from([
            "ffbench",
            "run",
            "--output-type",
            "de_265_to_264",
            "--read-rate",
            "--max-processes",
            "4",
            "--input-net-stream",
            "--timeout-seconds",
            "120",
            "--dry",
            "--media-root",
            "/var/bench",
        ])
        .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        let config = run_args_to_config(args);
        assert_eq!(config.output_type, "de_265_to_264");
        assert!(config.read_rate);
        assert_eq!(config.max_processes, 4);
        assert!(config.input_net_stream);
        assert!(!config.output_net_stream);
        assert_eq!(config.timeout_seconds, 120);
        assert!(config.dry);
        assert_eq!(config.media_root, PathBuf::from("/var/bench"));
    }
}
