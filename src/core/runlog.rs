use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;

use crate::core::error::BenchError;

/// Append-only sink for the run's side-channel log, shared by reference
/// across the batch. Write failures after open are ignored.
pub struct RunLog {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl RunLog {
    pub fn open(path: &Path) -> Result<Self, BenchError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| BenchError::RunLogOpen {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::from_writer(Box::new(file)))
    }

    pub fn from_writer(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    pub fn info(&self, message: &str) {
        self.write_line("INFO", message);
    }

    pub fn error(&self, message: &str) {
        self.write_line("ERROR", message);
    }

    fn write_line(&self, level: &str, message: &str) {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{stamp} {level} {message}");
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_sink::memory_log;

    #[test]
    fn writes_timestamped_level_lines() {
        let (log, sink) = memory_log();
        log.info("first job command");
        log.error("stream not reachable");

        let contents = sink.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" INFO first job command"));
        assert!(lines[1].contains(" ERROR stream not reachable"));
        // timestamp prefix: "YYYY-MM-DD HH:MM:SS.mmm"
        assert_eq!(lines[0].as_bytes()[4], b'-');
        assert_eq!(lines[0].as_bytes()[10], b' ');
        assert_eq!(lines[0].as_bytes()[19], b'.');
    }

    #[test]
    fn appends_in_call_order() {
        let (log, sink) = memory_log();
        for i in 0..3 {
            log.info(&format!("line {i}"));
        }
        let contents = sink.contents();
        let positions: Vec<usize> = (0..3)
            .map(|i| contents.find(&format!("line {i}")).unwrap())
            .collect();
        assert!(positions[0] < positions[1] && positions[1] < positions[2]);
    }
}
