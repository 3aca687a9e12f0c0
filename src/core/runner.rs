use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Instant;

use tracing::debug;

use crate::core::command::build_args;
use crate::core::error::BenchError;
use crate::core::job::{BatchReport, JobReport};
use crate::core::preset::Preset;
use crate::core::route;
use crate::core::runlog::RunLog;
use crate::core::stats;
use crate::core::RunConfig;

/// Runs one batch: validate, clear scratch, build every job's vector, then
/// spawn and join. Only an unknown preset aborts; job failures are logged
/// and the remaining jobs keep running.
pub fn run_batch(config: &RunConfig, log: &RunLog) -> Result<BatchReport, BenchError> {
    let preset: Preset = config.output_type.parse().map_err(|err: BenchError| {
        log.error(&err.to_string());
        err
    })?;

    clear_scratch(&config.scratch_dir(), log);

    let route = route::resolve(preset, config.input_net_stream, config.output_net_stream);
    if let Some(warning) = &route.warning {
        log.error(warning);
    }

    let vectors: Vec<Vec<String>> = (0..config.max_processes)
        .map(|index| build_args(config, preset, &route, index))
        .collect();

    if let Some(first) = vectors.first() {
        log.info(&shell_words::join(first));
    }

    if config.dry {
        debug!(jobs = vectors.len(), "dry run, nothing spawned");
        return Ok(BatchReport {
            jobs: Vec::new(),
            batch_speed: None,
        });
    }

    let handles: Vec<_> = vectors
        .into_iter()
        .enumerate()
        .map(|(index, args)| thread::spawn(move || run_job(index as u32, args)))
        .collect();
    debug!(jobs = handles.len(), "batch launched");

    let jobs = join_jobs(handles, log);
    Ok(summarize(jobs, config.max_processes, log))
}

/// Joins in launch order. A job whose worker failed to start or panicked
/// becomes an empty failed report; the rest are unaffected.
fn join_jobs(
    handles: Vec<thread::JoinHandle<Result<JobReport, io::Error>>>,
    log: &RunLog,
) -> Vec<JobReport> {
    handles
        .into_iter()
        .enumerate()
        .map(|(index, handle)| match handle.join() {
            Ok(Ok(report)) => report,
            Ok(Err(err)) => {
                log.error(&format!("job {index} failed to start: {err}"));
                JobReport::failed(index as u32)
            }
            Err(_) => {
                log.error(&format!("job {index} worker panicked"));
                JobReport::failed(index as u32)
            }
        })
        .collect()
}

fn summarize(jobs: Vec<JobReport>, max_processes: u32, log: &RunLog) -> BatchReport {
    let mut all_samples = Vec::new();
    for report in &jobs {
        let index = report.index;
        if let Some(avg) = report.average_speed() {
            log.info(&format!("job {index} average speed: {avg}"));
        }
        let stderr = report.stderr.trim();
        if !stderr.is_empty() {
            log.error(stderr);
        }
        if let Some(code) = report.exit_code {
            if code != 0 {
                log.error(&format!("job {index} exited with status {code}"));
            }
        }
        all_samples.extend_from_slice(&report.samples);
    }

    let batch_speed = stats::batch_speed(max_processes, &all_samples);
    if let Some(speed) = batch_speed {
        log.info(&format!("batch average speed: {speed}"));
    }

    BatchReport { jobs, batch_speed }
}

fn run_job(index: u32, args: Vec<String>) -> Result<JobReport, io::Error> {
    let (program, rest) = args
        .split_first()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty argument vector"))?;

    let started = Instant::now();
    let child = Command::new(program)
        .args(rest)
        // docker's -it refuses a nulled stdin, so jobs keep the caller's
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    let output = child.wait_with_output()?;
    debug!(
        job = index,
        elapsed = ?started.elapsed(),
        code = ?output.status.code(),
        "job exited"
    );

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let samples = stats::parse_speed_samples(&stdout);

    Ok(JobReport {
        index,
        exit_code: output.status.code(),
        stdout,
        stderr,
        samples,
    })
}

fn clear_scratch(dir: &Path, log: &RunLog) {
    if let Err(err) = std::fs::remove_dir_all(dir) {
        if err.kind() != io::ErrorKind::NotFound {
            log.error(&format!("cannot clear scratch dir {}: {err}", dir.display()));
        }
    }
    if let Err(err) = std::fs::create_dir_all(dir) {
        log.error(&format!("cannot create scratch dir {}: {err}", dir.display()));
    }
}
