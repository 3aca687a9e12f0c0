use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("unknown preset '{id}' (run `ffbench presets` for the known ids)")]
    UnknownPreset { id: String },
    #[error("cannot open run log {path}: {source}")]
    RunLogOpen {
        path: String,
        source: std::io::Error,
    },
}
