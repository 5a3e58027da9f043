use log::{debug, warn};
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{atomic, Arc};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::{ChildStdin, Command};
use tokio::select;
use tokio::sync::{mpsc, Notify};

/// What to run and where.
#[derive(Debug, Clone)]
pub struct ProcessStartInfo {
    pub target: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl ProcessStartInfo {
    pub fn command_line(&self) -> String {
        std::iter::once(self.target.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Stdout(String),
    Stderr(String),
    /// Always the last event; `None` when killed by a signal.
    Exited(Option<i32>),
}

// 服务器进程
pub struct ServerProcess {
    pid: u32,
    exited: Arc<atomic::AtomicBool>,
    kill_notify: Arc<Notify>,
    input_tx: mpsc::UnboundedSender<String>,
}

impl ServerProcess {
    /// Spawns the process with piped stdio. Output lines and the final exit
    /// arrive in order on the returned receiver.
    pub fn spawn(
        info: &ProcessStartInfo,
    ) -> io::Result<(Self, mpsc::UnboundedReceiver<ProcessEvent>)> {
        let mut cmd = Command::new(&info.target);
        cmd.args(&info.args)
            .current_dir(&info.working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut process = cmd.spawn()?;
        let pid = process.id().unwrap_or(0);

        let missing = |name: &str| io::Error::new(io::ErrorKind::BrokenPipe, format!("{name} not piped"));
        let stdout = process.stdout.take().ok_or_else(|| missing("stdout"))?;
        let stderr = process.stderr.take().ok_or_else(|| missing("stderr"))?;
        let stdin = process.stdin.take().ok_or_else(|| missing("stdin"))?;

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let kill_notify = Arc::new(Notify::new());
        let exited = Arc::new(atomic::AtomicBool::new(false));

        let stdout_task = tokio::spawn(Self::read_lines(stdout, ProcessEvent::Stdout, event_tx.clone()));
        let stderr_task = tokio::spawn(Self::read_lines(stderr, ProcessEvent::Stderr, event_tx.clone()));
        tokio::spawn(Self::write_lines(stdin, input_rx));

        tokio::spawn({
            let kill_notify = kill_notify.clone();
            let exited = exited.clone();
            async move {
                let status = select! {
                    status = process.wait() => status,
                    _ = kill_notify.notified() => {
                        if let Err(err) = process.start_kill() {
                            warn!("Could not kill process (pid={}): {}", pid, err);
                        }
                        process.wait().await
                    }
                };
                let code = match status {
                    Ok(status) => status.code(),
                    Err(err) => {
                        warn!("Could not wait for process (pid={}): {}", pid, err);
                        None
                    }
                };

                // let the readers drain what the process wrote before exiting
                let drained = tokio::time::timeout(Duration::from_secs(2), async {
                    let _ = stdout_task.await;
                    let _ = stderr_task.await;
                })
                .await;
                if drained.is_err() {
                    debug!("output of pid {} still open after exit", pid);
                }

                exited.store(true, atomic::Ordering::SeqCst);
                let _ = event_tx.send(ProcessEvent::Exited(code));
            }
        });

        Ok((
            ServerProcess {
                pid,
                exited,
                kill_notify,
                input_tx,
            },
            event_rx,
        ))
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Queues `line` plus a newline for the process's stdin.
    pub fn send_line(&self, line: &str) -> Result<(), mpsc::error::SendError<String>> {
        self.input_tx.send(line.to_string())
    }

    pub fn kill(&self) {
        self.kill_notify.notify_one();
    }

    pub fn exited(&self) -> bool {
        self.exited.load(atomic::Ordering::SeqCst)
    }
}

impl ServerProcess {
    async fn read_lines<R>(
        reader: R,
        wrap: fn(String) -> ProcessEvent,
        event_tx: mpsc::UnboundedSender<ProcessEvent>,
    ) where
        R: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf)
                        .trim_end_matches(['\r', '\n'])
                        .to_string();
                    if event_tx.send(wrap(line)).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    debug!("output stream closed: {}", err);
                    break;
                }
            }
        }
    }

    async fn write_lines(mut stdin: ChildStdin, mut input_rx: mpsc::UnboundedReceiver<String>) {
        while let Some(mut line) = input_rx.recv().await {
            line.push('\n');
            let written = async {
                stdin.write_all(line.as_bytes()).await?;
                stdin.flush().await
            }
            .await;
            if let Err(err) = written {
                debug!("stdin closed: {}", err);
                break;
            }
        }
    }
}
