use super::repository;
use contracts::domain::common::AggregateRoot;
use contracts::domain::a001_team::Team;
use contracts::system::tenant::ClubId;
use uuid::Uuid;

/// Сохранение новой команды (валидация + before_write)
pub async fn create(mut aggregate: Team) -> anyhow::Result<Uuid> {
    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    tracing::debug!(
        "{}: created {} {} ({})",
        Team::full_name(),
        Team::element_name(),
        aggregate.code(),
        aggregate.description()
    );
    Ok(id)
}

/// Получение списка команд клуба
pub async fn list_all(club: &ClubId) -> anyhow::Result<Vec<Team>> {
    repository::list_by_club(club).await
}

pub async fn get_by_id(club: &ClubId, id: Uuid) -> anyhow::Result<Option<Team>> {
    repository::get_by_id(club, id).await
}

pub async fn id_taken(id: Uuid) -> anyhow::Result<bool> {
    repository::id_exists(id).await
}
