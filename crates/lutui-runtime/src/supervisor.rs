//! Process supervision for launched games.
//!
//! Every game is spawned as the leader of a fresh process group. Launchers
//! like Lutris fork wrappers, wine servers and the game itself, and nothing
//! guarantees those descendants stay children of the pid we spawned; the
//! group id is the one handle that reaches all of them. Termination therefore
//! signals `-pgid`, never the tracked pid alone.
//!
//! A launch is split in two halves:
//! - [`ProcessHandle`], kept by the supervisor, keyed by [`EntryId`]
//! - [`Waiter`], which owns the `Child` and is moved to whatever thread
//!   blocks on the exit
//!
//! The waiter never touches the catalog or the supervisor. Its
//! [`ExitReport`] is handed back to [`ProcessSupervisor::reap`] by the owner
//! of the state, which discards reports whose generation no longer matches.

use crate::launcher::CommandFactory;
use chrono::{DateTime, Utc};
use lutui_types::{CatalogEntry, EntryId};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum SupervisorError {
    /// A live handle already exists for this entry
    AlreadyRunning(EntryId),

    /// Spawning the process failed; the entry stays not-running
    LaunchFailed { id: EntryId, source: io::Error },

    /// Terminate was requested for an entry without a live handle
    NotRunning(EntryId),
}

impl fmt::Display for SupervisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupervisorError::AlreadyRunning(id) => write!(f, "Game {} is already running", id),
            SupervisorError::LaunchFailed { id, source } => {
                write!(f, "Failed to launch game {}: {}", id, source)
            }
            SupervisorError::NotRunning(id) => {
                write!(f, "Game {} has no running process to terminate", id)
            }
        }
    }
}

impl std::error::Error for SupervisorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SupervisorError::LaunchFailed { source, .. } => Some(source),
            SupervisorError::AlreadyRunning(_) | SupervisorError::NotRunning(_) => None,
        }
    }
}

/// Supervisor-side record of a live launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessHandle {
    pid: u32,
    generation: u64,
    started_at: DateTime<Utc>,
}

impl ProcessHandle {
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// The child is spawned as group leader, so its pid is the group id.
    pub fn pgid(&self) -> u32 {
        self.pid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitState {
    Exited(i32),
    Signaled(i32),
    Unknown(String),
}

impl ExitState {
    fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ExitState::Exited(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ExitState::Signaled(signal);
            }
        }
        ExitState::Unknown(status.to_string())
    }
}

impl fmt::Display for ExitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitState::Exited(code) => write!(f, "exit code {}", code),
            ExitState::Signaled(signal) => write!(f, "killed by signal {}", signal),
            ExitState::Unknown(reason) => write!(f, "unknown status: {}", reason),
        }
    }
}

/// What a [`Waiter`] observed when its process exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitReport {
    pub id: EntryId,
    pub generation: u64,
    pub state: ExitState,
}

/// The blocking half of a launch. Owns the child process.
#[derive(Debug)]
pub struct Waiter {
    id: EntryId,
    generation: u64,
    child: Child,
}

impl Waiter {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Block until the direct child exits and reap it.
    pub fn wait(mut self) -> ExitReport {
        let state = match self.child.wait() {
            Ok(status) => ExitState::from_status(status),
            Err(err) => ExitState::Unknown(err.to_string()),
        };
        ExitReport {
            id: self.id,
            generation: self.generation,
            state,
        }
    }
}

/// Owns one [`ProcessHandle`] per running entry.
pub struct ProcessSupervisor<F> {
    factory: F,
    handles: HashMap<EntryId, ProcessHandle>,
    next_generation: u64,
}

impl<F: CommandFactory> ProcessSupervisor<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            handles: HashMap::new(),
            next_generation: 0,
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Spawn `entry` in a new process group and mark it running.
    pub fn launch(&mut self, entry: &mut CatalogEntry) -> Result<Waiter, SupervisorError> {
        if entry.is_running || self.handles.contains_key(&entry.id) {
            return Err(SupervisorError::AlreadyRunning(entry.id));
        }

        let mut command = self.factory.command(entry);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        isolate_process_group(&mut command);

        let child = command.spawn().map_err(|source| {
            warn!(id = %entry.id, error = %source, "spawn failed");
            SupervisorError::LaunchFailed {
                id: entry.id,
                source,
            }
        })?;

        self.next_generation += 1;
        let handle = ProcessHandle {
            pid: child.id(),
            generation: self.next_generation,
            started_at: Utc::now(),
        };
        info!(
            id = %entry.id,
            name = %entry.name,
            pid = handle.pid,
            pgid = handle.pgid(),
            generation = handle.generation,
            "game launched"
        );

        let waiter = Waiter {
            id: entry.id,
            generation: handle.generation,
            child,
        };
        self.handles.insert(entry.id, handle);
        entry.is_running = true;

        Ok(waiter)
    }

    /// SIGKILL the entry's whole process group and mark it not-running.
    ///
    /// Does not wait for the tree to die. The outstanding [`Waiter`] sees the
    /// exit and its report is dropped by [`reap`](Self::reap) as stale.
    pub fn terminate(&mut self, entry: &mut CatalogEntry) -> Result<(), SupervisorError> {
        let Some(handle) = self.handles.remove(&entry.id) else {
            return Err(SupervisorError::NotRunning(entry.id));
        };

        match kill_process_group(handle.pgid()) {
            Ok(()) => info!(
                id = %entry.id,
                pgid = handle.pgid(),
                generation = handle.generation,
                "process group killed"
            ),
            Err(err) => warn!(
                id = %entry.id,
                pgid = handle.pgid(),
                error = %err,
                "failed to kill process group; clearing handle anyway"
            ),
        }
        entry.is_running = false;

        Ok(())
    }

    /// Blocking form of wait, for callers that own both the state and the
    /// waiter on the same thread.
    pub fn wait(&mut self, entry: &mut CatalogEntry, waiter: Waiter) -> ExitReport {
        let report = waiter.wait();
        self.reap(Some(entry), &report);
        report
    }

    /// Apply a completion. Returns `true` only if it cleared the live handle.
    ///
    /// Reports from a launch that was already terminated, or superseded by a
    /// relaunch, are ignored. `entry` may be `None` if the entry is no longer
    /// in the catalog.
    pub fn reap(&mut self, entry: Option<&mut CatalogEntry>, report: &ExitReport) -> bool {
        match self.handles.get(&report.id) {
            Some(handle) if handle.generation == report.generation => {
                self.handles.remove(&report.id);
                if let Some(entry) = entry {
                    debug_assert_eq!(entry.id, report.id);
                    entry.is_running = false;
                }
                info!(
                    id = %report.id,
                    generation = report.generation,
                    state = %report.state,
                    "game exited"
                );
                true
            }
            Some(handle) => {
                warn!(
                    id = %report.id,
                    stale = report.generation,
                    live = handle.generation,
                    "ignoring exit from superseded launch"
                );
                false
            }
            None => {
                debug!(
                    id = %report.id,
                    generation = report.generation,
                    "exit after terminate; nothing to reap"
                );
                false
            }
        }
    }

    pub fn is_running(&self, id: EntryId) -> bool {
        self.handles.contains_key(&id)
    }

    pub fn handle(&self, id: EntryId) -> Option<&ProcessHandle> {
        self.handles.get(&id)
    }

    pub fn running_ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.handles.keys().copied()
    }

    pub fn running_count(&self) -> usize {
        self.handles.len()
    }
}

#[cfg(unix)]
fn isolate_process_group(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(windows)]
fn isolate_process_group(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    command.creation_flags(CREATE_NEW_PROCESS_GROUP);
}

#[cfg(unix)]
fn kill_process_group(pgid: u32) -> io::Result<()> {
    // -0 and -1 would address our own group and every process we may signal.
    if pgid <= 1 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to signal process group {}", pgid),
        ));
    }

    let rc = unsafe { libc::kill(-(pgid as libc::pid_t), libc::SIGKILL) };
    if rc == 0 {
        return Ok(());
    }

    let err = io::Error::last_os_error();
    if err.raw_os_error() == Some(libc::ESRCH) {
        // The whole group is already gone.
        return Ok(());
    }
    Err(err)
}

#[cfg(windows)]
fn kill_process_group(pid: u32) -> io::Result<()> {
    let status = Command::new("taskkill")
        .args(["/PID", &pid.to_string(), "/T", "/F"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("taskkill exited with {}", status)))
    }
}
