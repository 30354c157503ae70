//! u101: массовый импорт команд и игроков из CSV
//!
//! Двухшаговый протокол: `validate` (файл → построчный отчёт) и
//! `upload` (только строки без ошибок → результат создания).

pub mod kind;
pub mod report;
pub mod request;
pub mod result;
pub mod rows;

pub use kind::ImportKind;
pub use report::{ValidationReport, ValidationRow, ValidationSummary};
pub use request::UploadRequest;
pub use result::{RowError, SkippedRow, UploadResult, UploadSummary};
pub use rows::{ImportRow, PlayerRow, PlayerUpload, TeamRow, TeamUpload};

use crate::usecases::common::UseCaseMetadata;

/// Максимальный размер CSV файла по умолчанию (5 MB)
pub const DEFAULT_MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

/// Максимальное количество строк в одной загрузке по умолчанию
pub const DEFAULT_MAX_ROWS: usize = 1000;

pub struct U101BulkImport;

impl UseCaseMetadata for U101BulkImport {
    fn usecase_index() -> &'static str {
        "u101"
    }

    fn usecase_name() -> &'static str {
        "bulk_import"
    }

    fn display_name() -> &'static str {
        "CSV bulk import"
    }

    fn description() -> &'static str {
        "Create teams and players in bulk from a CSV file"
    }
}
