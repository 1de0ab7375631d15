use std::time::Duration;

use log::*;
use tokio::{task::JoinHandle, time::sleep};

use crate::proc::probe::ResourceProbe;

/// One reading in the recorded series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub index: usize,
    pub cpu_percent: f32,
    pub memory_mb: f32,
}

/// Append-only record of every sample taken during one run.
///
/// Written by the sampler task alone; ownership moves to the reporting side
/// through the task's join handle, so by the time anyone reads it, it is
/// frozen.
#[derive(Debug, Default)]
pub struct TimeSeries {
    samples: Vec<Sample>,
    peak_memory_mb: f32,
}

impl TimeSeries {
    /// Append a reading under the next sequence index and fold it into the
    /// running memory peak.
    pub fn push(&mut self, cpu_percent: f32, memory_mb: f32) {
        self.samples.push(Sample {
            index: self.samples.len(),
            cpu_percent,
            memory_mb,
        });
        self.peak_memory_mb = self.peak_memory_mb.max(memory_mb);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn peak_memory_mb(&self) -> f32 {
        self.peak_memory_mb
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Start the polling loop for `pid` on its own task.
///
/// The returned handle resolves exactly once, handing over the finished
/// series. An unattachable pid still resolves, with an empty series.
pub fn spawn(pid: u32, interval: Duration) -> JoinHandle<TimeSeries> {
    tokio::spawn(sample_process(pid, interval))
}

async fn sample_process(pid: u32, interval: Duration) -> TimeSeries {
    let mut series = TimeSeries::default();
    let mut probe = match ResourceProbe::attach(pid) {
        Ok(probe) => probe,
        Err(err) => {
            warn!(target: "Sampler", "Could not attach to process {}: {}", pid, err);
            return series;
        }
    };
    while probe.is_running() {
        match probe.snapshot() {
            Some(snap) => series.push(snap.cpu_percent, snap.memory_mb),
            // An unreadable tick is skipped, not fatal.
            None => debug!(target: "Sampler", "Unreadable tick for pid {}", pid),
        }
        sleep(interval).await;
    }
    debug!(target: "Sampler", "Process {} gone after {} samples", pid, series.len());
    series
}
