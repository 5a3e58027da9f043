use log::warn;
use paperdash_protocol::status::{PlayerCounts, PluginSummary, ServerStats, ServerSummary};

use crate::management::Supervisor;
use crate::storage::ServerFiles;
use crate::utils::status::{get_cpu_info, get_ram_info};

/// Everything `GET /api/stats` shows: server, worlds, players, host and plugins.
pub async fn get_server_stats(
    supervisor: &Supervisor,
    files: &ServerFiles,
) -> anyhow::Result<ServerStats> {
    let status = supervisor.status();
    let players = files.players(status.is_running()).await;
    let plugins = files.plugins().await.unwrap_or_else(|err| {
        warn!("could not list plugins: {:#}", err);
        vec![]
    });
    let worlds = files.worlds().await?;
    let properties = files.properties_or_empty().await;

    Ok(ServerStats {
        server: ServerSummary {
            status,
            difficulty: worlds.difficulty,
            world_type: worlds.world_type,
        },
        worlds: worlds.worlds,
        players: PlayerCounts {
            online: players.online.len(),
            total: players.all.len(),
            max_players: ServerFiles::max_players(&properties),
        },
        ram: get_ram_info(),
        cpu: get_cpu_info(),
        plugins: PluginSummary {
            total: plugins.len(),
            list: plugins,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::management::ConsoleConfig;
    use paperdash_protocol::management::server::{ServerConfig, ServerStatus};

    #[tokio::test]
    async fn stats_for_an_idle_server() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("server.properties"), "max-players=64\ndifficulty=2\n")
            .unwrap();
        std::fs::create_dir_all(dir.path().join("plugins")).unwrap();
        std::fs::write(dir.path().join("plugins/Chunky.jar"), b"").unwrap();

        let supervisor = Supervisor::new(ServerConfig::default(), ConsoleConfig::default());
        let stats = get_server_stats(&supervisor, &ServerFiles::new(dir.path()))
            .await
            .unwrap();

        assert_eq!(stats.server.status, ServerStatus::Stopped);
        assert_eq!(stats.server.difficulty, "normal");
        assert_eq!(stats.players.max_players, 64);
        assert_eq!(stats.players.online, 0);
        assert_eq!(stats.plugins.total, 1);
        assert_eq!(stats.worlds.len(), 3);
    }
}
