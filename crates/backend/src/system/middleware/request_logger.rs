use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;
use contracts::system::tenant::CLUB_HEADER;

use crate::shared::format::format_number;

/// Голубой для 2xx, коричневый для остальных
fn status_color(status: StatusCode) -> &'static str {
    if status.is_success() {
        "36"
    } else {
        "33"
    }
}

/// Middleware для логирования HTTP запросов
///
/// Одна строка на запрос: время, длительность, размер ответа,
/// статус, метод, путь и клуб из `X-Club-Id`.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let club = req
        .headers()
        .get(CLUB_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Тело читается целиком, чтобы узнать реальный размер
    let (bytes, size) = match to_bytes(body, usize::MAX).await {
        Ok(b) => {
            let size = format_number(b.len());
            (b, size)
        }
        Err(_) => (Default::default(), "error".to_string()),
    };

    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {} [{}]",
        status_color(parts.status),
        Local::now().format("%H:%M:%S"),
        start.elapsed().as_millis(),
        size,
        parts.status.as_u16(),
        method,
        path,
        club
    );

    Response::from_parts(parts, Body::from(bytes))
}
