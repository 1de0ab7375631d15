use std::ffi::OsStr;
use std::process::ExitStatus;

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use log::*;
use tokio::process::{Child, Command};

/// Owns the lifecycle of the monitored child process.
#[derive(Debug)]
pub struct Supervisor {
    child: Child,
    pid: u32,
}

impl Supervisor {
    /// Spawn `program` with `args`. Stdio is inherited so the monitored
    /// program's own output flows through untouched.
    pub fn start<S, I>(program: S, args: I) -> Result<Supervisor>
    where
        S: AsRef<OsStr>,
        I: IntoIterator<Item = S>,
    {
        let mut cmd = Command::new(program.as_ref());
        cmd.args(args);
        info!(target: "Supervisor", "Spawning {:?}", cmd);
        let child = cmd
            .spawn()
            .wrap_err_with(|| format!("Failed to start process {:?}", program.as_ref()))?;
        let pid = child
            .id()
            .ok_or_else(|| eyre!("Could not retrieve pid of spawned process"))?;
        Ok(Supervisor { child, pid })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Resolves when the child exits. Safe to race against cancellation: if
    /// the future is dropped unresolved, the child is untouched.
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        let status = self.child.wait().await.wrap_err("Failed waiting on child")?;
        debug!(target: "Supervisor", "Process exit {:?}", status);
        Ok(status)
    }

    /// Best-effort forced termination. Also reaps the child, so no zombie
    /// outlives the run. A process that already exited is not an error.
    pub async fn kill(&mut self) {
        if let Err(err) = self.child.kill().await {
            debug!(target: "Supervisor", "Kill failed, process likely already gone: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn start_unknown_executable_fails() {
        let result = Supervisor::start("procpulse-no-such-binary", []);
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn wait_reports_exit_status() {
        let mut supervisor = Supervisor::start("sh", ["-c", "exit 3"]).unwrap();
        assert!(supervisor.pid() > 0);
        let status = supervisor.wait().await.unwrap();
        assert_eq!(status.code(), Some(3));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn kill_twice_is_harmless() {
        let mut supervisor = Supervisor::start("sleep", ["30"]).unwrap();
        supervisor.kill().await;
        supervisor.kill().await;
    }
}
