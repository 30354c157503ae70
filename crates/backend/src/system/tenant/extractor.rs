use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use contracts::system::tenant::{ClubId, CLUB_HEADER};

use crate::shared::api_error::ApiError;

/// Клуб (tenant), в контексте которого выполняется запрос.
/// Берётся из заголовка `X-Club-Id`; без него запрос отклоняется с 400.
///
/// Usage in handlers: `async fn handler(ClubContext(club): ClubContext) -> ...`
#[derive(Debug, Clone)]
pub struct ClubContext(pub ClubId);

#[async_trait]
impl<S> FromRequestParts<S> for ClubContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = match parts.headers.get(CLUB_HEADER) {
            Some(value) => value
                .to_str()
                .map_err(|_| ApiError::BadRequest("Invalid club context.".into()))?,
            None => "",
        };
        ClubId::parse(raw)
            .map(ClubContext)
            .map_err(ApiError::BadRequest)
    }
}
