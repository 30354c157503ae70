use chrono::{DateTime, Utc};
use contracts::usecases::u101_bulk_import::{DEFAULT_MAX_FILE_BYTES, DEFAULT_MAX_ROWS};

/// DD.MM.YYYY HH:MM для таблиц
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%d.%m.%Y %H:%M").to_string()
}

/// Подсказка об ограничениях импорта (проверяет их backend)
pub fn import_limits_hint() -> String {
    format!(
        "Max file size: {} MB · Max rows: {}",
        DEFAULT_MAX_FILE_BYTES / (1024 * 1024),
        DEFAULT_MAX_ROWS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(format_timestamp(dt), "15.03.2024 14:02");
    }

    #[test]
    fn test_limits_hint() {
        assert_eq!(import_limits_hint(), "Max file size: 5 MB · Max rows: 1000");
    }
}
