//! Выполнение upload: backend повторно проверяет каждую строку
//! (проверка на клиенте носит рекомендательный характер).

use contracts::domain::a001_team::aggregate::validate_team_name;
use contracts::domain::a001_team::{Team, TeamId};
use contracts::domain::a002_player::aggregate::{validate_email, validate_player_name};
use contracts::domain::a002_player::{Player, PlayerId};
use contracts::system::tenant::ClubId;
use contracts::usecases::common::{UseCaseError, UseCaseResult};
use contracts::usecases::u101_bulk_import::{PlayerUpload, TeamUpload, UploadResult};
use uuid::Uuid;

use super::roster::RosterSnapshot;
use super::store::RosterStore;
use super::validator::parse_optional_uuid;

fn check_row_limit(len: usize, max_rows: usize) -> UseCaseResult<()> {
    if len > max_rows {
        return Err(UseCaseError::validation(format!(
            "Upload exceeds the maximum of {} rows.",
            max_rows
        )));
    }
    Ok(())
}

const SAVE_TEAM_FAILED: &str = "Failed to save team.";
const SAVE_PLAYER_FAILED: &str = "Failed to save player.";

/// Результат проверки одной строки перед записью
enum RowDecision<T> {
    Create(T),
    Skip(String),
    Reject(String),
}

// ============================================================================
// Teams
// ============================================================================

pub async fn upload_teams(
    store: &dyn RosterStore,
    club: &ClubId,
    rows: Vec<TeamUpload>,
    max_rows: usize,
) -> UseCaseResult<UploadResult> {
    check_row_limit(rows.len(), max_rows)?;
    let mut roster = store.snapshot(club).await?;
    let mut result = UploadResult::default();

    for row in rows {
        match decide_team(club, &row, &roster) {
            RowDecision::Reject(error) => result.record_error(row.row, error),
            RowDecision::Skip(reason) => result.record_skipped(row.row, reason),
            RowDecision::Create(team) => {
                let id = team.base.id.value();
                let name = team.name().to_string();
                match save_team(store, row.row, team).await {
                    Ok(()) => {
                        roster.add_team(id, &name);
                        result.record_created();
                    }
                    Err(error) => result.record_error(row.row, error),
                }
            }
        }
    }

    tracing::info!("u101: teams upload for club {}: {}", club, result.summary);
    Ok(result)
}

/// Запись команды: id проверяется во всех клубах, текст ошибки хранилища только в логе
async fn save_team(store: &dyn RosterStore, row: usize, team: Team) -> Result<(), String> {
    let id = team.base.id.value();
    match store.team_id_taken(id).await {
        Ok(true) => return Err(format!("Team ID {} is already in use.", id)),
        Ok(false) => {}
        Err(e) => {
            tracing::error!("u101: failed to check team id on row {}: {}", row, e);
            return Err(SAVE_TEAM_FAILED.to_string());
        }
    }
    store.create_team(team).await.map_err(|e| {
        tracing::error!("u101: failed to create team on row {}: {}", row, e);
        SAVE_TEAM_FAILED.to_string()
    })
}

fn decide_team(club: &ClubId, row: &TeamUpload, roster: &RosterSnapshot) -> RowDecision<Team> {
    let name = row.team_name.trim();
    if let Err(e) = validate_team_name(name) {
        return RowDecision::Reject(e);
    }
    let id = match parse_optional_uuid(row.team_id.as_deref()) {
        Err(()) => return RowDecision::Reject("Invalid teamId: must be a UUID.".into()),
        Ok(id) => id,
    };
    if let Some(id) = id.filter(|id| roster.has_team(*id)) {
        return RowDecision::Skip(format!("Team ID {} already exists", id));
    }
    if roster.team_id_by_name(name).is_some() {
        return RowDecision::Skip(format!("Team \"{}\" already exists", name));
    }
    RowDecision::Create(Team::new_for_insert(
        id.map(TeamId::new),
        club.as_str().to_string(),
        name.to_string(),
    ))
}

// ============================================================================
// Players
// ============================================================================

pub async fn upload_players(
    store: &dyn RosterStore,
    club: &ClubId,
    rows: Vec<PlayerUpload>,
    max_rows: usize,
) -> UseCaseResult<UploadResult> {
    check_row_limit(rows.len(), max_rows)?;
    let mut roster = store.snapshot(club).await?;
    let mut result = UploadResult::default();

    for row in rows {
        match decide_player(club, &row, &roster) {
            RowDecision::Reject(error) => result.record_error(row.row, error),
            RowDecision::Skip(reason) => result.record_skipped(row.row, reason),
            RowDecision::Create(player) => {
                let id = player.base.id.value();
                let email = player.email.clone();
                match save_player(store, row.row, player).await {
                    Ok(()) => {
                        roster.add_player(id, email.as_deref());
                        result.record_created();
                    }
                    Err(error) => result.record_error(row.row, error),
                }
            }
        }
    }

    tracing::info!("u101: players upload for club {}: {}", club, result.summary);
    Ok(result)
}

async fn save_player(store: &dyn RosterStore, row: usize, player: Player) -> Result<(), String> {
    let id = player.base.id.value();
    match store.player_id_taken(id).await {
        Ok(true) => return Err(format!("Player ID {} is already in use.", id)),
        Ok(false) => {}
        Err(e) => {
            tracing::error!("u101: failed to check player id on row {}: {}", row, e);
            return Err(SAVE_PLAYER_FAILED.to_string());
        }
    }
    store.create_player(player).await.map_err(|e| {
        tracing::error!("u101: failed to create player on row {}: {}", row, e);
        SAVE_PLAYER_FAILED.to_string()
    })
}

fn decide_player(
    club: &ClubId,
    row: &PlayerUpload,
    roster: &RosterSnapshot,
) -> RowDecision<Player> {
    let name = row.name.trim();
    if let Err(e) = validate_player_name(name) {
        return RowDecision::Reject(e);
    }
    let email = row
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());
    if let Some(email) = email {
        if let Err(e) = validate_email(email) {
            return RowDecision::Reject(e);
        }
    }
    let player_id = match parse_optional_uuid(row.player_id.as_deref()) {
        Err(()) => return RowDecision::Reject("Invalid playerId: must be a UUID.".into()),
        Ok(id) => id,
    };
    let team_id = match Uuid::parse_str(row.team_id.trim()) {
        Ok(id) if roster.has_team(id) => id,
        Ok(id) => return RowDecision::Reject(format!("Team not found: {}", id)),
        Err(_) if row.team_id.trim().is_empty() => {
            return RowDecision::Reject("teamId is required.".into())
        }
        Err(_) => return RowDecision::Reject("Invalid teamId: must be a UUID.".into()),
    };

    if let Some(id) = player_id.filter(|id| roster.has_player(*id)) {
        return RowDecision::Skip(format!("Player ID {} already exists", id));
    }
    if let Some(email) = email.filter(|e| roster.has_player_email(e)) {
        return RowDecision::Skip(format!(
            "Player with email {} already exists",
            email.to_lowercase()
        ));
    }

    RowDecision::Create(Player::new_for_insert(
        player_id.map(PlayerId::new),
        club.as_str().to_string(),
        TeamId::new(team_id),
        name.to_string(),
        email.map(str::to_string),
    ))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::usecases::u101_bulk_import::UploadSummary;
    use std::sync::Mutex;

    /// Хранилище в памяти для тестов импорта
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub teams: Mutex<Vec<Team>>,
        pub players: Mutex<Vec<Player>>,
        pub fail_on_name: Option<String>,
    }

    impl MemoryStore {
        pub(crate) fn with_team(club: &ClubId, name: &str) -> (Self, Uuid) {
            let team = Team::new_for_insert(None, club.as_str().to_string(), name.to_string());
            let id = team.base.id.value();
            let store = Self::default();
            store.teams.lock().unwrap().push(team);
            (store, id)
        }
    }

    #[async_trait]
    impl RosterStore for MemoryStore {
        async fn snapshot(&self, club: &ClubId) -> anyhow::Result<RosterSnapshot> {
            let teams: Vec<Team> = self
                .teams
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.base.club_id == club.as_str())
                .cloned()
                .collect();
            let players: Vec<Player> = self
                .players
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.base.club_id == club.as_str())
                .cloned()
                .collect();
            Ok(RosterSnapshot::new(&teams, &players))
        }

        async fn team_id_taken(&self, id: Uuid) -> anyhow::Result<bool> {
            Ok(self
                .teams
                .lock()
                .unwrap()
                .iter()
                .any(|t| t.base.id.value() == id))
        }

        async fn player_id_taken(&self, id: Uuid) -> anyhow::Result<bool> {
            Ok(self
                .players
                .lock()
                .unwrap()
                .iter()
                .any(|p| p.base.id.value() == id))
        }

        async fn create_team(&self, team: Team) -> anyhow::Result<()> {
            if self.fail_on_name.as_deref() == Some(team.name()) {
                anyhow::bail!("database is locked");
            }
            self.teams.lock().unwrap().push(team);
            Ok(())
        }

        async fn create_player(&self, player: Player) -> anyhow::Result<()> {
            if self.fail_on_name.as_deref() == Some(player.name()) {
                anyhow::bail!("database is locked");
            }
            self.players.lock().unwrap().push(player);
            Ok(())
        }
    }

    fn club() -> ClubId {
        ClubId::parse("riverside").unwrap()
    }

    fn team_row(row: usize, name: &str) -> TeamUpload {
        TeamUpload {
            row,
            team_name: name.to_string(),
            team_id: None,
        }
    }

    fn player_row(row: usize, name: &str, email: Option<&str>, team: Uuid) -> PlayerUpload {
        PlayerUpload {
            row,
            name: name.to_string(),
            email: email.map(str::to_string),
            team_id: team.to_string(),
            player_id: None,
        }
    }

    #[tokio::test]
    async fn test_upload_teams_creates_and_skips() {
        let (store, _) = MemoryStore::with_team(&club(), "U12 Hawks");
        let rows = vec![
            team_row(1, "U14 Falcons"),
            team_row(2, "u12 hawks"),
            team_row(3, "U14 FALCONS"),
            team_row(4, " "),
        ];

        let result = upload_teams(&store, &club(), rows, 1000).await.unwrap();

        assert_eq!(
            result.summary,
            UploadSummary {
                created: 1,
                skipped: 2,
                errors: 1
            }
        );
        assert_eq!(result.skipped[0].row, 2);
        assert_eq!(result.skipped[1].row, 3);
        assert_eq!(result.errors[0].row, 4);
        assert_eq!(result.errors[0].error, "Team name is required.");
        assert_eq!(store.teams.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_upload_teams_keeps_given_id() {
        let store = MemoryStore::default();
        let id = Uuid::new_v4();
        let rows = vec![TeamUpload {
            row: 1,
            team_name: "Owls".into(),
            team_id: Some(id.to_string()),
        }];
        let result = upload_teams(&store, &club(), rows, 1000).await.unwrap();
        assert_eq!(result.summary.created, 1);
        assert_eq!(store.teams.lock().unwrap()[0].base.id.value(), id);
    }

    #[tokio::test]
    async fn test_upload_teams_is_tenant_scoped() {
        let other = ClubId::parse("hillside").unwrap();
        let (store, _) = MemoryStore::with_team(&other, "U12 Hawks");
        let result = upload_teams(&store, &club(), vec![team_row(1, "U12 Hawks")], 1000)
            .await
            .unwrap();
        assert_eq!(result.summary.created, 1);
    }

    #[tokio::test]
    async fn test_upload_players_two_valid_rows() {
        let (store, team) = MemoryStore::with_team(&club(), "U12 Hawks");
        let rows = vec![
            player_row(1, "Sam Lee", Some("sam@example.com"), team),
            player_row(2, "Ana Diaz", None, team),
        ];

        let result = upload_players(&store, &club(), rows, 1000).await.unwrap();

        assert_eq!(
            result.summary,
            UploadSummary {
                created: 2,
                skipped: 0,
                errors: 0
            }
        );
        assert_eq!(result.summary.to_string(), "Created: 2 · Skipped: 0 · Errors: 0");
        let players = store.players.lock().unwrap();
        assert_eq!(players[0].email.as_deref(), Some("sam@example.com"));
        assert_eq!(players[1].team_id.value(), team);
    }

    #[tokio::test]
    async fn test_upload_players_rejects_and_skips() {
        let (store, team) = MemoryStore::with_team(&club(), "U12 Hawks");
        let rows = vec![
            player_row(1, "Sam", Some("sam@example.com"), team),
            player_row(2, "Sammy", Some("SAM@example.com"), team),
            player_row(3, "Bo", None, Uuid::new_v4()),
            PlayerUpload {
                team_id: String::new(),
                ..player_row(4, "Cy", None, team)
            },
            player_row(5, "Di", Some("not-an-email"), team),
        ];

        let result = upload_players(&store, &club(), rows, 1000).await.unwrap();

        assert_eq!(result.summary.created, 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].row, 2);
        assert_eq!(
            result.skipped[0].reason,
            "Player with email sam@example.com already exists"
        );
        let error_rows: Vec<usize> = result.errors.iter().map(|e| e.row).collect();
        assert_eq!(error_rows, vec![3, 4, 5]);
        assert_eq!(result.errors[1].error, "teamId is required.");
    }

    #[tokio::test]
    async fn test_store_failure_becomes_row_error() {
        let store = MemoryStore {
            fail_on_name: Some("Owls".into()),
            ..Default::default()
        };
        let rows = vec![team_row(1, "Owls"), team_row(2, "Hawks")];
        let result = upload_teams(&store, &club(), rows, 1000).await.unwrap();
        assert_eq!(result.summary.created, 1);
        assert_eq!(result.errors[0].row, 1);
        assert_eq!(result.errors[0].error, "Failed to save team.");
    }

    #[tokio::test]
    async fn test_ids_taken_by_another_club() {
        let other = ClubId::parse("hillside").unwrap();
        let (store, foreign_team) = MemoryStore::with_team(&other, "Hawks");
        let foreign_player = Player::new_for_insert(
            None,
            other.as_str().to_string(),
            TeamId::new(foreign_team),
            "Sam".into(),
            None,
        );
        let foreign_player_id = foreign_player.base.id.value();
        store.players.lock().unwrap().push(foreign_player);

        let rows = vec![TeamUpload {
            row: 1,
            team_name: "Owls".into(),
            team_id: Some(foreign_team.to_string()),
        }];
        let result = upload_teams(&store, &club(), rows, 1000).await.unwrap();
        assert_eq!(result.summary.created, 0);
        assert_eq!(
            result.errors[0].error,
            format!("Team ID {} is already in use.", foreign_team)
        );
        assert_eq!(store.teams.lock().unwrap().len(), 1);

        let team = Team::new_for_insert(None, club().as_str().to_string(), "Owls".into());
        let team_id = team.base.id.value();
        store.teams.lock().unwrap().push(team);
        let rows = vec![PlayerUpload {
            player_id: Some(foreign_player_id.to_string()),
            ..player_row(1, "Ana", None, team_id)
        }];
        let result = upload_players(&store, &club(), rows, 1000).await.unwrap();
        assert_eq!(
            result.errors[0].error,
            format!("Player ID {} is already in use.", foreign_player_id)
        );
        assert_eq!(store.players.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_row_limit() {
        let store = MemoryStore::default();
        let rows = vec![team_row(1, "A"), team_row(2, "B")];
        let err = upload_teams(&store, &club(), rows, 1).await.unwrap_err();
        assert!(err.is_validation());
        assert!(store.teams.lock().unwrap().is_empty());
    }
}
