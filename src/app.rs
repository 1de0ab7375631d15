use std::ffi::OsString;
use std::process::ExitStatus;
use std::time::{Duration, Instant};

use color_eyre::Result;
use color_eyre::eyre::eyre;
use log::*;
use tokio::select;

use crate::{
    config::PulseConfig,
    proc::{
        sampler::{self, TimeSeries},
        supervisor::Supervisor,
    },
};

/// How one run came to an end.
#[derive(Debug)]
pub enum RunOutcome {
    /// The child exited on its own.
    Exited(ExitStatus),
    /// The operator interrupted the run and the child was killed.
    Interrupted,
}

/// Everything the reporting stage needs once monitoring has stopped.
#[derive(Debug)]
pub struct FinishedRun {
    pub outcome: RunOutcome,
    pub series: TimeSeries,
    pub duration: Duration,
}

/// Launch the command and monitor it until it exits or the operator
/// interrupts. By the time this returns, the sampler task has finished and
/// the series it hands back is frozen.
pub async fn run(command: &[OsString], config: &PulseConfig) -> Result<FinishedRun> {
    monitor(command, config, shutdown_signal()).await
}

/// The supervision loop, with the interrupt source injected so tests can
/// trigger it without delivering real signals.
async fn monitor<F>(command: &[OsString], config: &PulseConfig, interrupt: F) -> Result<FinishedRun>
where
    F: Future<Output = std::io::Result<()>>,
{
    let (program, args) = command
        .split_first()
        .ok_or_else(|| eyre!("No command given"))?;
    let started = Instant::now();
    let mut supervisor = Supervisor::start(program, args)?;
    let sampler = sampler::spawn(supervisor.pid(), config.poll_interval());

    let outcome = select! {
        status = supervisor.wait() => {
            RunOutcome::Exited(status?)
        }
        res = interrupt => {
            res?;
            println!("\n[!] Interrupted. Killing process...");
            supervisor.kill().await;
            RunOutcome::Interrupted
        }
    };

    // The child is gone on both branches, so the sampler's next liveness
    // check fails and this join is bounded by one poll interval.
    let series = sampler.await?;
    debug!(target: "App", "Sampler closed with {} samples", series.len());

    Ok(FinishedRun {
        outcome,
        series,
        duration: started.elapsed(),
    })
}

/// Resolves on the first interrupt or termination signal from the OS.
#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};
    let mut terminate = signal(SignalKind::terminate())?;
    select! {
        res = tokio::signal::ctrl_c() => res,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

#[cfg(all(test, unix))]
mod tests {
    use std::future::pending;

    use tokio::time::sleep;

    use super::*;

    fn command(line: &str) -> Vec<OsString> {
        ["sh", "-c", line].iter().map(OsString::from).collect()
    }

    fn test_config() -> PulseConfig {
        PulseConfig {
            poll_interval_ms: 10,
            ..PulseConfig::default()
        }
    }

    #[tokio::test]
    async fn short_run_collects_samples_and_exits_normally() {
        let finished = monitor(&command("sleep 0.5"), &test_config(), pending())
            .await
            .unwrap();
        match finished.outcome {
            RunOutcome::Exited(status) => assert!(status.success()),
            other => panic!("expected a natural exit, got {:?}", other),
        }
        assert!(
            finished.series.len() >= 20,
            "expected a dense series, got {} samples",
            finished.series.len()
        );
        assert!(finished.duration >= Duration::from_millis(450));
        assert!(finished.duration < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn interrupt_kills_child_and_drains_sampler() {
        let interrupt = async {
            sleep(Duration::from_millis(200)).await;
            std::io::Result::Ok(())
        };
        let finished = monitor(&command("sleep 30"), &test_config(), interrupt)
            .await
            .unwrap();
        assert!(matches!(finished.outcome, RunOutcome::Interrupted));
        assert!(finished.duration >= Duration::from_millis(200));
        assert!(
            finished.duration < Duration::from_secs(5),
            "run should end promptly after the kill, took {:?}",
            finished.duration
        );
        assert!(!finished.series.is_empty());
    }

    #[tokio::test]
    async fn abnormal_exit_still_produces_a_run() {
        let finished = monitor(&command("sleep 0.2; exit 7"), &test_config(), pending())
            .await
            .unwrap();
        match finished.outcome {
            RunOutcome::Exited(status) => assert_eq!(status.code(), Some(7)),
            other => panic!("expected a natural exit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_command_is_rejected() {
        let result = monitor(&[], &test_config(), pending()).await;
        assert!(result.is_err());
    }
}
