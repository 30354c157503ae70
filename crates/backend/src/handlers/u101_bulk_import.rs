use axum::body::Bytes;
use axum::extract::{Multipart, Path};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::usecases::u101_bulk_import::{ImportKind, PlayerUpload, TeamUpload, UploadRequest};
use serde::de::DeserializeOwned;

use crate::shared::api_error::ApiError;
use crate::shared::config::import_config;
use crate::shared::format::format_size;
use crate::system::tenant::ClubContext;
use crate::usecases::u101_bulk_import::{service, DbRosterStore};

fn parse_kind(raw: &str) -> Result<ImportKind, ApiError> {
    raw.parse::<ImportKind>().map_err(ApiError::NotFound)
}

/// Содержимое поля `file` из multipart формы
async fn read_file_field(multipart: &mut Multipart) -> Result<Bytes, ApiError> {
    let too_large = || {
        ApiError::PayloadTooLarge(format!(
            "File exceeds the maximum size of {}.",
            format_size(import_config().max_file_bytes)
        ))
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(ApiError::BadRequest("Missing form field: file".into())),
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => return Err(too_large()),
            Err(e) => return Err(ApiError::BadRequest(e.body_text())),
        };
        if field.name() != Some("file") {
            continue;
        }
        return match field.bytes().await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => Err(too_large()),
            Err(e) => Err(ApiError::BadRequest(e.body_text())),
        };
    }
}

fn parse_rows<U: DeserializeOwned>(body: &[u8]) -> Result<Vec<U>, ApiError> {
    serde_json::from_slice::<UploadRequest<U>>(body)
        .map(|request| request.rows)
        .map_err(|e| ApiError::BadRequest(format!("Invalid upload payload: {}", e)))
}

/// POST /api/u101/import/:kind/validate
pub async fn validate(
    ClubContext(club): ClubContext,
    Path(kind): Path<String>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let kind = parse_kind(&kind)?;
    let bytes = read_file_field(&mut multipart).await?;
    let limits = import_config();
    tracing::info!(
        "u101: validate {} for club {} ({} bytes)",
        kind,
        club,
        bytes.len()
    );

    let response = match kind {
        ImportKind::Teams => {
            Json(service::validate_teams_csv(&DbRosterStore, &club, &bytes, &limits).await?)
                .into_response()
        }
        ImportKind::Players => {
            Json(service::validate_players_csv(&DbRosterStore, &club, &bytes, &limits).await?)
                .into_response()
        }
    };
    Ok(response)
}

/// POST /api/u101/import/:kind/upload
pub async fn upload(
    ClubContext(club): ClubContext,
    Path(kind): Path<String>,
    body: Bytes,
) -> Result<Json<contracts::usecases::u101_bulk_import::UploadResult>, ApiError> {
    let kind = parse_kind(&kind)?;
    let limits = import_config();

    let result = match kind {
        ImportKind::Teams => {
            let rows = parse_rows::<TeamUpload>(&body)?;
            service::upload_teams(&DbRosterStore, &club, rows, &limits).await?
        }
        ImportKind::Players => {
            let rows = parse_rows::<PlayerUpload>(&body)?;
            service::upload_players(&DbRosterStore, &club, rows, &limits).await?
        }
    };
    Ok(Json(result))
}

/// GET /api/u101/import/:kind/template
pub async fn template(Path(kind): Path<String>) -> Result<Response, ApiError> {
    let kind = parse_kind(&kind)?;
    let disposition = format!("attachment; filename=\"{}\"", kind.template_file_name());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        kind.template_csv(),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_is_not_found() {
        let err = parse_kind("coaches").unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Unknown import kind: coaches");
    }

    #[test]
    fn test_parse_rows() {
        let rows: Vec<TeamUpload> =
            parse_rows(br#"{"rows":[{"row":1,"teamName":"U12 Hawks"}]}"#).unwrap();
        assert_eq!(rows[0].team_name, "U12 Hawks");

        let err = parse_rows::<PlayerUpload>(br#"{"rows":[{"row":1}]}"#).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
