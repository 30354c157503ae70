use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Запас сверх лимита файла на служебные части multipart формы
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Конфигурация всех роутов приложения
pub fn configure_routes(max_file_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // ROSTER
        // ========================================
        .route("/api/team", get(handlers::a001_team::list_all))
        .route("/api/team/:id", get(handlers::a001_team::get_by_id))
        .route("/api/player", get(handlers::a002_player::list_all))
        // ========================================
        // U101: CSV BULK IMPORT
        // ========================================
        .route(
            "/api/u101/import/:kind/validate",
            post(handlers::u101_bulk_import::validate)
                .layer(DefaultBodyLimit::max(max_file_bytes + MULTIPART_OVERHEAD)),
        )
        .route(
            "/api/u101/import/:kind/upload",
            post(handlers::u101_bulk_import::upload),
        )
        .route(
            "/api/u101/import/:kind/template",
            get(handlers::u101_bulk_import::template),
        )
}
