use axum::{extract::Path, Json};
use contracts::domain::a001_team::aggregate::Team;

use crate::domain::a001_team;
use crate::shared::api_error::ApiError;
use crate::system::tenant::ClubContext;

/// GET /api/team
pub async fn list_all(ClubContext(club): ClubContext) -> Result<Json<Vec<Team>>, ApiError> {
    let items = a001_team::service::list_all(&club).await?;
    Ok(Json(items))
}

/// GET /api/team/:id
pub async fn get_by_id(
    ClubContext(club): ClubContext,
    Path(id): Path<String>,
) -> Result<Json<Team>, ApiError> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|_| ApiError::BadRequest(format!("Invalid team id: {}", id)))?;
    a001_team::service::get_by_id(&club, uuid)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Team not found: {}", id)))
}
