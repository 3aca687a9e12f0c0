use once_cell::sync::Lazy;
use regex::Regex;

static RE_SPEED: Lazy<Regex> = Lazy::new(|| Regex::new(r"speed=\s*(N/A|[0-9]*\.?[0-9]+)x?").unwrap());

/// Collects every throughput multiplier in the captured text, in emission order.
/// ffmpeg rewrites its progress line in place, so markers arrive separated by
/// `\r` as often as `\n`; both count as record breaks here. `N/A` sentinels and
/// non-numeric values are dropped without comment.
pub fn parse_speed_samples(stdout: &str) -> Vec<f64> {
    stdout.split(['\r', '\n']).filter_map(parse_speed_line).collect()
}

fn parse_speed_line(line: &str) -> Option<f64> {
    let caps = RE_SPEED.captures(line)?;
    let value = caps.get(1)?.as_str();
    if value == "N/A" {
        return None;
    }
    value.parse::<f64>().ok()
}

pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Batch-wide average: observed mean single-stream speed extrapolated across
/// the full process fan-out. The `max_processes` factor is part of the
/// reported metric's definition, not a unit conversion.
pub fn batch_speed(max_processes: u32, samples: &[f64]) -> Option<f64> {
    mean(samples).map(|avg| f64::from(max_processes) * avg)
}
