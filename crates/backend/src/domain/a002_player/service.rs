use super::repository;
use contracts::domain::common::AggregateRoot;
use contracts::domain::a002_player::Player;
use contracts::system::tenant::ClubId;
use uuid::Uuid;

/// Сохранение нового игрока (валидация + before_write)
pub async fn create(mut aggregate: Player) -> anyhow::Result<Uuid> {
    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    tracing::debug!(
        "{}: created {} {} ({})",
        Player::full_name(),
        Player::element_name(),
        aggregate.code(),
        aggregate.description()
    );
    Ok(id)
}

/// Игроки клуба; при заданной команде — только её состав
pub async fn list(club: &ClubId, team_id: Option<Uuid>) -> anyhow::Result<Vec<Player>> {
    match team_id {
        Some(team_id) => repository::list_by_team(club, team_id).await,
        None => repository::list_by_club(club).await,
    }
}

pub async fn id_taken(id: Uuid) -> anyhow::Result<bool> {
    repository::id_exists(id).await
}
