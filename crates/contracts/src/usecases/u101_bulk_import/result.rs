use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UploadSummary {
    pub created: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl std::fmt::Display for UploadSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Created: {} · Skipped: {} · Errors: {}",
            self.created, self.skipped, self.errors
        )
    }
}

/// Строка пропущена (например, запись уже существует)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

/// Строка не загружена из-за ошибки
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row: usize,
    pub error: String,
}

/// Результат массовой загрузки
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UploadResult {
    pub summary: UploadSummary,
    #[serde(default)]
    pub skipped: Vec<SkippedRow>,
    #[serde(default)]
    pub errors: Vec<RowError>,
}

impl UploadResult {
    pub fn record_created(&mut self) {
        self.summary.created += 1;
    }

    pub fn record_skipped(&mut self, row: usize, reason: impl Into<String>) {
        self.skipped.push(SkippedRow {
            row,
            reason: reason.into(),
        });
        self.summary.skipped = self.skipped.len();
    }

    pub fn record_error(&mut self, row: usize, error: impl Into<String>) {
        self.errors.push(RowError {
            row,
            error: error.into(),
        });
        self.summary.errors = self.errors.len();
    }

    pub fn processed(&self) -> usize {
        self.summary.created + self.summary.skipped + self.summary.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display() {
        let summary = UploadSummary {
            created: 2,
            skipped: 0,
            errors: 0,
        };
        assert_eq!(summary.to_string(), "Created: 2 · Skipped: 0 · Errors: 0");
    }

    #[test]
    fn test_record_keeps_summary_in_sync() {
        let mut result = UploadResult::default();
        result.record_created();
        result.record_skipped(2, "Team already exists");
        result.record_error(3, "Team not found");
        result.record_error(4, "Team not found");

        assert_eq!(
            result.summary,
            UploadSummary {
                created: 1,
                skipped: 1,
                errors: 2
            }
        );
        assert_eq!(result.processed(), 4);
        assert_eq!(result.skipped[0].row, 2);
    }

    #[test]
    fn test_deserialize_without_item_lists() {
        let result: UploadResult =
            serde_json::from_str(r#"{"summary":{"created":2,"skipped":0,"errors":0}}"#).unwrap();
        assert_eq!(result.summary.created, 2);
        assert!(result.skipped.is_empty());
    }
}
