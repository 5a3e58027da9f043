use log::{error, info, warn};
use paperdash_protocol::management::server::{LogEntry, ServerConfig, ServerStatus, TargetType};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};

use crate::management::comm::{ProcessEvent, ProcessHelper, ServerProcess};
use crate::management::config::{ConsoleConfig, ServerConfigExt};
use crate::management::log_buffer::{ConsoleEvent, LogBuffer};
use crate::management::minecraft::{is_done_line, is_stopping_line};
use crate::management::SupervisorError;

/// Time between SIGTERM and SIGKILL once the grace period has run out.
const FORCE_KILL_DELAY: Duration = Duration::from_secs(5);

struct Handle {
    generation: u64,
    process: ServerProcess,
}

/// Owns the single PaperMC server process and everything observed from it.
///
/// Status changes are published on a `watch` channel and, together with
/// console lines, on the log buffer's broadcast channel. All output and the
/// exit of a process are handled by one task per process, so transitions
/// caused by the process happen in order.
pub struct Supervisor {
    status: watch::Sender<ServerStatus>,
    server: RwLock<ServerConfig>,
    console: ConsoleConfig,
    logs: LogBuffer,
    process: Mutex<Option<Handle>>,
    generation: AtomicU64,
}

impl Supervisor {
    pub fn new(server: ServerConfig, console: ConsoleConfig) -> Self {
        let (status, _) = watch::channel(ServerStatus::Stopped);
        Self {
            status,
            server: RwLock::new(server),
            logs: LogBuffer::new(console.capacity),
            console,
            process: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn status(&self) -> ServerStatus {
        *self.status.borrow()
    }

    pub fn watch_status(&self) -> watch::Receiver<ServerStatus> {
        self.status.subscribe()
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    pub fn console_config(&self) -> &ConsoleConfig {
        &self.console
    }

    pub fn server_config(&self) -> ServerConfig {
        self.server
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Takes effect on the next start.
    pub fn set_server_config(&self, config: ServerConfig) {
        *self.server.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    pub fn pid(&self) -> Option<u32> {
        self.slot().as_ref().map(|handle| handle.process.pid())
    }

    /// Current status, the last `replay` lines and a receiver for what follows.
    pub fn subscribe(
        &self,
        replay: usize,
    ) -> (ServerStatus, Vec<LogEntry>, broadcast::Receiver<ConsoleEvent>) {
        // receiver first: a status change racing with this call is delivered again
        let (snapshot, rx) = self.logs.subscribe(replay);
        (self.status(), snapshot, rx)
    }

    fn slot(&self) -> MutexGuard<'_, Option<Handle>> {
        self.process.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_status(&self, status: ServerStatus) {
        self.status.send_replace(status);
        self.logs.publish_status(status);
    }

    /// Moves `from` to `to` only if the status is still `from`.
    fn transition(&self, from: ServerStatus, to: ServerStatus) -> bool {
        let changed = self.status.send_if_modified(|current| {
            if *current == from {
                *current = to;
                true
            } else {
                false
            }
        });
        if changed {
            self.logs.publish_status(to);
        }
        changed
    }
}

impl Supervisor {
    /// Spawns the server and returns once the process is running; the
    /// `running` status follows when the server prints its ready banner.
    pub fn start(self: &Arc<Self>) -> Result<(), SupervisorError> {
        if !self.transition(ServerStatus::Stopped, ServerStatus::Starting) {
            return Err(SupervisorError::AlreadyRunning);
        }

        self.logs.clear();
        self.logs.append("Initialized new server session log.");
        self.logs.append("Starting PaperMC server...");

        let config = self.server_config();
        self.launch(&config).inspect_err(|err| {
            error!("could not start server: {}", err);
            self.logs.append(format!("ERROR: {}", err));
            self.set_status(ServerStatus::Stopped);
        })
    }

    fn launch(self: &Arc<Self>, config: &ServerConfig) -> Result<(), SupervisorError> {
        let start_info = config.get_start_info()?;
        if config.target_type == TargetType::Jar {
            self.logs.append(format!("Using Java: {}", start_info.target));
        }
        self.logs
            .append(format!("Starting with command: {}", start_info.command_line()));

        let (process, events) = ServerProcess::spawn(&start_info).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                SupervisorError::ExecutableNotFound(start_info.target.clone())
            } else {
                SupervisorError::Spawn(err)
            }
        })?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            "server process started (pid={}) in {}",
            process.pid(),
            start_info.working_dir.display()
        );
        *self.slot() = Some(Handle {
            generation,
            process,
        });

        tokio::spawn(self.clone().pump(generation, events));
        Ok(())
    }

    async fn pump(self: Arc<Self>, generation: u64, mut events: mpsc::UnboundedReceiver<ProcessEvent>) {
        while let Some(event) = events.recv().await {
            match event {
                ProcessEvent::Stdout(line) => self.handle_line(line, false),
                ProcessEvent::Stderr(line) => self.handle_line(line, true),
                ProcessEvent::Exited(code) => {
                    self.handle_exit(generation, code);
                    break;
                }
            }
        }
    }

    fn handle_line(&self, line: String, stderr: bool) {
        let done = is_done_line(&line);
        let stopping = !done && is_stopping_line(&line);

        if stderr {
            self.logs.append(format!("[STDERR] {}", line));
        } else {
            self.logs.append(line);
        }

        if done && self.transition(ServerStatus::Starting, ServerStatus::Running) {
            info!("server is ready");
            self.logs.append("Server started successfully!");
        } else if stopping {
            self.transition(ServerStatus::Running, ServerStatus::Stopping);
        }
    }

    fn handle_exit(&self, generation: u64, code: Option<i32>) {
        {
            let mut slot = self.slot();
            if slot.as_ref().is_some_and(|h| h.generation == generation) {
                *slot = None;
            }
        }

        let code = code.map_or_else(|| "null".to_string(), |c| c.to_string());
        info!("server process exited with code {}", code);
        self.logs.append(format!("Server stopped with code {}", code));
        self.set_status(ServerStatus::Stopped);
    }

    /// Sends `stop` to the console and terminates the process if it is
    /// still alive after the grace period.
    pub fn stop(self: &Arc<Self>) -> Result<(), SupervisorError> {
        let generation = {
            let slot = self.slot();
            let handle = match slot.as_ref() {
                Some(handle) if !self.status().is_stopped() => handle,
                _ => return Err(SupervisorError::NotRunning),
            };

            self.set_status(ServerStatus::Stopping);
            self.logs.append("Stopping server...");
            if handle.process.send_line("stop").is_err() {
                warn!("console input already closed, relying on forced termination");
            }
            handle.generation
        };

        let this = self.clone();
        let grace = self.console.stop_grace();
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            let Some(pid) = this.live_pid(generation) else {
                return;
            };
            warn!("server did not stop within {:?}, terminating pid {}", grace, pid);
            this.logs.append("Server did not stop in time, terminating process...");
            if let Err(err) = ProcessHelper::stop(pid) {
                warn!("could not terminate pid {}: {}", pid, err);
            }

            tokio::time::sleep(FORCE_KILL_DELAY).await;
            if this.live_pid(generation).is_some() {
                warn!("killing pid {}", pid);
                this.kill(generation);
            }
        });

        Ok(())
    }

    /// `stop`, wait for the exit, pause, then `start`. An already stopped
    /// server is simply started.
    pub async fn restart(self: &Arc<Self>) -> Result<(), SupervisorError> {
        match self.stop() {
            Ok(()) | Err(SupervisorError::NotRunning) => {}
            Err(err) => return Err(err),
        }

        let bound = self.console.stop_grace() + FORCE_KILL_DELAY + Duration::from_secs(1);
        if !self.wait_until_stopped(bound).await {
            warn!("server still not stopped after {:?}", bound);
        }
        tokio::time::sleep(self.console.restart_delay()).await;
        self.start()
    }

    /// Stops a live server and waits for it; used when the daemon exits.
    pub async fn shutdown(self: &Arc<Self>) {
        if self.stop().is_err() {
            return;
        }
        info!("waiting for the server to stop");

        let bound = self.console.stop_grace() + FORCE_KILL_DELAY;
        if !self.wait_until_stopped(bound).await {
            let generation = self.slot().as_ref().map(|h| h.generation);
            if let Some(generation) = generation {
                self.kill(generation);
                self.wait_until_stopped(FORCE_KILL_DELAY).await;
            }
        }
    }

    pub async fn wait_until_stopped(&self, timeout: Duration) -> bool {
        let mut rx = self.status.subscribe();
        let stopped = matches!(
            tokio::time::timeout(timeout, rx.wait_for(|s| s.is_stopped())).await,
            Ok(Ok(_))
        );
        stopped
    }

    fn live_pid(&self, generation: u64) -> Option<u32> {
        self.slot()
            .as_ref()
            .filter(|h| h.generation == generation && !h.process.exited())
            .map(|h| h.process.pid())
    }

    fn kill(&self, generation: u64) {
        if let Some(handle) = self.slot().as_ref().filter(|h| h.generation == generation) {
            handle.process.kill();
        }
    }

    /// Writes one line to the server console. Callers check the status.
    pub(crate) fn write_line(&self, line: &str) -> Result<(), SupervisorError> {
        let slot = self.slot();
        let handle = slot.as_ref().ok_or(SupervisorError::NotRunning)?;
        handle
            .process
            .send_line(line)
            .map_err(|_| SupervisorError::StdinClosed)
    }
}
