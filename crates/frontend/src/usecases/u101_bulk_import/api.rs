use contracts::shared::ErrorResponse;
use contracts::system::tenant::CLUB_HEADER;
use contracts::usecases::u101_bulk_import::{
    ImportKind, ImportRow, UploadRequest, UploadResult, ValidationReport,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};

use crate::shared::api_utils::api_url;

/// Ошибка обращения к backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Запрос не дошёл или ответ не разобран
    Network(String),
    /// Ответ не 2xx; `message` из тела `{"message": ...}`, если есть
    Server { status: u16, message: Option<String> },
}

impl ApiError {
    /// Сообщение ошибки как есть (backend или транспорт), иначе `fallback`
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ApiError::Network(message) if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "network error: {}", e),
            ApiError::Server { status, message } => write!(
                f,
                "HTTP {}: {}",
                status,
                message.as_deref().unwrap_or("<no message>")
            ),
        }
    }
}

fn import_path(kind: ImportKind, action: &str) -> String {
    format!("/api/u101/import/{}/{}", kind.as_str(), action)
}

pub fn template_url(kind: ImportKind) -> String {
    api_url(&import_path(kind, "template"))
}

/// Текст ошибки из тела ответа
fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.message)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Server {
            status,
            message: parse_error_message(&body),
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Network(format!("Failed to parse response: {}", e)))
}

/// POST /api/u101/import/{kind}/validate (multipart, поле `file`)
pub async fn validate<R: ImportRow>(
    club: &str,
    file: &File,
) -> Result<ValidationReport<R>, ApiError> {
    let form = FormData::new().map_err(|e| ApiError::Network(format!("{e:?}")))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| ApiError::Network(format!("{e:?}")))?;

    let response = Request::post(&api_url(&import_path(R::KIND, "validate")))
        .header(CLUB_HEADER, club)
        .body(form)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let report: ValidationReport<R> = read_json(response).await?;
    if !report.is_consistent() {
        log::warn!("u101: inconsistent validation report for {}", R::KIND);
        return Err(ApiError::Network("Inconsistent validation report".into()));
    }
    Ok(report)
}

/// POST /api/u101/import/{kind}/upload
pub async fn upload<R: ImportRow>(
    club: &str,
    request: &UploadRequest<R::Upload>,
) -> Result<UploadResult, ApiError> {
    let response = Request::post(&api_url(&import_path(R::KIND, "upload")))
        .header(CLUB_HEADER, club)
        .json(request)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    read_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_or_fallback() {
        let server = ApiError::Server {
            status: 400,
            message: Some("CSV file is empty.".into()),
        };
        assert_eq!(server.message_or("Failed to validate CSV file."), "CSV file is empty.");

        let blank = ApiError::Server {
            status: 500,
            message: Some("  ".into()),
        };
        assert_eq!(blank.message_or("Failed to upload rows."), "Failed to upload rows.");

        let network = ApiError::Network("Failed to fetch".into());
        assert_eq!(network.message_or("Failed to upload rows."), "Failed to fetch");

        let silent = ApiError::Network(String::new());
        assert_eq!(silent.message_or("Failed to upload rows."), "Failed to upload rows.");
    }

    #[test]
    fn test_parse_error_message() {
        assert_eq!(
            parse_error_message(r#"{"message":"Missing required column: teamName"}"#),
            Some("Missing required column: teamName".to_string())
        );
        assert_eq!(parse_error_message("<html>Bad Gateway</html>"), None);
    }

    #[test]
    fn test_import_path() {
        assert_eq!(
            import_path(ImportKind::Players, "validate"),
            "/api/u101/import/players/validate"
        );
    }
}
