use color_eyre::eyre::eyre;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// One CPU/memory reading taken live from the OS.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    pub cpu_percent: f32,
    pub memory_mb: f32,
}

/// Reads live resource usage for a single process.
///
/// Wraps a [`sysinfo::System`] refreshed for just the watched pid, so a poll
/// touches one process table entry rather than the whole machine.
pub struct ResourceProbe {
    sys: System,
    pid: Pid,
}

impl ResourceProbe {
    /// Attach to a running process. Fails if no such process exists.
    pub fn attach(pid: u32) -> color_eyre::Result<ResourceProbe> {
        let pid = Pid::from_u32(pid);
        let mut sys = System::new();
        refresh(&mut sys, pid);
        if sys.process(pid).is_none() {
            return Err(eyre!("No process with pid {}", pid));
        }
        Ok(ResourceProbe { sys, pid })
    }

    /// False once the process has exited. Never an error: a process that
    /// vanished between calls just reads as not running.
    pub fn is_running(&mut self) -> bool {
        refresh(&mut self.sys, self.pid);
        self.sys.process(self.pid).is_some()
    }

    /// Best-effort read of the entry refreshed by the preceding
    /// [`is_running`](Self::is_running) call. `None` means the reading was
    /// unavailable this tick.
    pub fn snapshot(&self) -> Option<Snapshot> {
        let info = self.sys.process(self.pid)?;
        Some(Snapshot {
            cpu_percent: info.cpu_usage(),
            memory_mb: info.memory() as f32 / 1024.0 / 1024.0,
        })
    }
}

fn refresh(sys: &mut System, pid: Pid) {
    sys.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing().with_cpu().with_memory(),
    );
}
