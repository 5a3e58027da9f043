//! A scripted stand-in for a PaperMC server, driven through `sh`.

use paperdash_protocol::management::server::{ServerConfig, ServerStatus, TargetType};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::{ConsoleConfig, Supervisor};

/// Prints the ready banner, answers `tps`, echoes other input as `got <line>`,
/// stays silent for lines starting with `quiet` and exits on `stop`.
pub const FAKE_SERVER: &str = r#"
echo "[12:00:00 INFO]: Starting minecraft server version 1.21.4"
echo "[12:00:01 INFO]: Done (1.234s)! For help, type \"help\""
while IFS= read -r line; do
  case "$line" in
    stop) echo "[12:00:09 INFO]: Stopping the server"; exit 0 ;;
    quiet*) ;;
    tps) echo "[12:00:05 INFO]: §6TPS from last 1m, 5m, 15m: §a20.0, §a19.98, §a*19.5" ;;
    *) echo "got $line" ;;
  esac
done
"#;

/// Never becomes ready; exits on `stop`.
pub const SILENT_SERVER: &str = r#"
while IFS= read -r line; do
  case "$line" in
    stop) exit 0 ;;
    *) echo "got $line" ;;
  esac
done
"#;

/// Becomes ready but ignores `stop`.
pub const STUBBORN_SERVER: &str = r#"
echo "Done (0.5s)! For help, type \"help\""
while IFS= read -r line; do
  echo "ignoring $line"
done
"#;

pub fn fake_config(dir: &Path, script: &str) -> ServerConfig {
    std::fs::write(dir.join("fake-server.sh"), script).unwrap();
    ServerConfig {
        server_path: dir.to_path_buf(),
        server_jar: "sh".into(),
        target_type: TargetType::Executable,
        arguments: vec!["fake-server.sh".into()],
        ..ServerConfig::default()
    }
}

pub fn test_console() -> ConsoleConfig {
    ConsoleConfig {
        stop_grace_secs: 1,
        restart_delay_secs: 0,
        collect_timeout_ms: 1000,
        ..ConsoleConfig::default()
    }
}

pub fn fake_supervisor(dir: &Path, script: &str) -> Arc<Supervisor> {
    Arc::new(Supervisor::new(fake_config(dir, script), test_console()))
}

pub async fn running_fake(dir: &Path) -> Arc<Supervisor> {
    let supervisor = fake_supervisor(dir, FAKE_SERVER);
    supervisor.start().unwrap();
    wait_for_status(&supervisor, ServerStatus::Running).await;
    supervisor
}

pub async fn wait_for_status(supervisor: &Supervisor, status: ServerStatus) {
    let mut rx = supervisor.watch_status();
    tokio::time::timeout(Duration::from_secs(10), rx.wait_for(|s| *s == status))
        .await
        .unwrap_or_else(|_| panic!("server never became {}", status))
        .unwrap();
}
