use async_trait::async_trait;
use contracts::domain::a001_team::Team;
use contracts::domain::a002_player::Player;
use contracts::system::tenant::ClubId;
use uuid::Uuid;

use super::roster::RosterSnapshot;
use crate::domain::{a001_team, a002_player};

/// Хранилище состава клуба, с которым работает импорт
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Текущие команды и игроки клуба
    async fn snapshot(&self, club: &ClubId) -> anyhow::Result<RosterSnapshot>;

    /// id команды занят в любом клубе
    async fn team_id_taken(&self, id: Uuid) -> anyhow::Result<bool>;

    /// id игрока занят в любом клубе
    async fn player_id_taken(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn create_team(&self, team: Team) -> anyhow::Result<()>;

    async fn create_player(&self, player: Player) -> anyhow::Result<()>;
}

/// Реализация поверх SQLite (сервисы a001/a002)
pub struct DbRosterStore;

#[async_trait]
impl RosterStore for DbRosterStore {
    async fn snapshot(&self, club: &ClubId) -> anyhow::Result<RosterSnapshot> {
        let teams = a001_team::service::list_all(club).await?;
        let players = a002_player::service::list(club, None).await?;
        tracing::debug!(
            "Roster snapshot for club {}: {} teams, {} players",
            club,
            teams.len(),
            players.len()
        );
        Ok(RosterSnapshot::new(&teams, &players))
    }

    async fn team_id_taken(&self, id: Uuid) -> anyhow::Result<bool> {
        a001_team::service::id_taken(id).await
    }

    async fn player_id_taken(&self, id: Uuid) -> anyhow::Result<bool> {
        a002_player::service::id_taken(id).await
    }

    async fn create_team(&self, team: Team) -> anyhow::Result<()> {
        a001_team::service::create(team).await.map(|_| ())
    }

    async fn create_player(&self, player: Player) -> anyhow::Result<()> {
        a002_player::service::create(player).await.map(|_| ())
    }
}

/// Снимок клуба, в котором отмечены id из файла, занятые в других клубах
pub async fn snapshot_with_ids(
    store: &dyn RosterStore,
    club: &ClubId,
    team_ids: &[Uuid],
    player_ids: &[Uuid],
) -> anyhow::Result<RosterSnapshot> {
    let mut roster = store.snapshot(club).await?;
    for &id in team_ids {
        if !roster.has_team(id) && store.team_id_taken(id).await? {
            roster.mark_foreign_team(id);
        }
    }
    for &id in player_ids {
        if !roster.has_player(id) && store.player_id_taken(id).await? {
            roster.mark_foreign_player(id);
        }
    }
    Ok(roster)
}
