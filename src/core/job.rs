use crate::core::stats;

/// Captured outcome of one job's subprocess.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub index: u32,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub samples: Vec<f64>,
}

impl JobReport {
    /// Placeholder for a job whose subprocess never produced output
    /// (spawn failure or worker panic).
    pub fn failed(index: u32) -> Self {
        Self {
            index,
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            samples: Vec::new(),
        }
    }

    pub fn average_speed(&self) -> Option<f64> {
        stats::mean(&self.samples)
    }
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub jobs: Vec<JobReport>,
    pub batch_speed: Option<f64>,
}
