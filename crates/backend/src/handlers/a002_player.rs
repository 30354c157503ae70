use axum::{extract::Query, Json};
use contracts::domain::a002_player::aggregate::Player;
use serde::Deserialize;

use crate::domain::a002_player;
use crate::shared::api_error::ApiError;
use crate::system::tenant::ClubContext;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub team_id: Option<String>,
}

/// GET /api/player?team_id=...
pub async fn list_all(
    ClubContext(club): ClubContext,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let team_id = match query.team_id.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            uuid::Uuid::parse_str(raw)
                .map_err(|_| ApiError::BadRequest(format!("Invalid team id: {}", raw)))?,
        ),
        None => None,
    };
    let items = a002_player::service::list(&club, team_id).await?;
    Ok(Json(items))
}
