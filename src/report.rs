use std::time::Duration;

use crate::proc::sampler::TimeSeries;

/// Summary statistics for one finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub duration_seconds: f64,
    pub average_cpu_percent: f32,
    pub peak_cpu_percent: f32,
    pub peak_memory_mb: f32,
}

/// Reduce a frozen series to its summary. `None` means no samples were
/// recorded, which is a reportable outcome, not an error.
///
/// Peak memory comes from the running peak tracked while sampling, not a
/// second pass over the series.
pub fn summarize(series: &TimeSeries, duration: Duration) -> Option<RunSummary> {
    let samples = series.samples();
    if samples.is_empty() {
        return None;
    }
    let total: f32 = samples.iter().map(|s| s.cpu_percent).sum();
    let peak = samples.iter().map(|s| s.cpu_percent).fold(0.0, f32::max);
    Some(RunSummary {
        duration_seconds: duration.as_secs_f64(),
        average_cpu_percent: total / samples.len() as f32,
        peak_cpu_percent: peak,
        peak_memory_mb: series.peak_memory_mb(),
    })
}

pub fn print_summary(summary: Option<&RunSummary>) {
    let Some(summary) = summary else {
        println!("No samples recorded.");
        return;
    };
    println!("========== procpulse report ==========");
    println!("Duration        : {:.2}s", summary.duration_seconds);
    println!("Avg CPU Usage   : {:.2}%", summary.average_cpu_percent);
    println!("Peak CPU Usage  : {:.2}%", summary.peak_cpu_percent);
    println!("Peak Memory RSS : {:.2} MB", summary.peak_memory_mb);
}
