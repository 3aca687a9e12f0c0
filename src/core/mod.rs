use std::path::PathBuf;

pub mod command;
pub mod error;
pub mod job;
pub mod preset;
pub mod route;
pub mod runlog;
pub mod runner;
pub mod stats;

/// One run's immutable settings, fixed before the batch starts.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub output_type: String,
    pub read_rate: bool,
    pub max_processes: u32,
    pub input_net_stream: bool,
    pub output_net_stream: bool,
    pub timeout_seconds: u32,
    pub dry: bool,
    pub media_root: PathBuf,
    pub image: String,
}

impl RunConfig {
    /// Host-side scratch directory, `/media/outputs` inside the container.
    pub fn scratch_dir(&self) -> PathBuf {
        self.media_root.join("outputs")
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_type: "de_264_only".to_string(),
            read_rate: false,
            max_processes: 1,
            input_net_stream: false,
            output_net_stream: false,
            timeout_seconds: 60,
            dry: false,
            media_root: PathBuf::from("/tmp"),
            image: "linuxserver/ffmpeg".to_string(),
        }
    }
}
