use serde::{Deserialize, Serialize};

use super::rows::ImportRow;

/// Строка предпросмотра: данные строки + ошибки (исключают строку из загрузки)
/// и предупреждения (строка остаётся допустимой)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRow<R> {
    #[serde(flatten)]
    pub data: R,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl<R> ValidationRow<R> {
    pub fn new(data: R) -> Self {
        Self {
            data,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
}

/// Построчный отчёт валидации CSV файла
///
/// `preview` хранит строки в порядке исходного файла.
/// `valid == true` тогда и только тогда, когда ни одна строка не содержит ошибок.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport<R> {
    pub valid: bool,
    pub summary: ValidationSummary,
    pub preview: Vec<ValidationRow<R>>,
}

impl<R: ImportRow> ValidationReport<R> {
    /// Собрать отчёт; `valid` и `summary` выводятся из строк
    pub fn from_preview(preview: Vec<ValidationRow<R>>) -> Self {
        let total_rows = preview.len();
        let valid_rows = preview.iter().filter(|r| r.is_valid()).count();
        let invalid_rows = total_rows - valid_rows;
        Self {
            valid: invalid_rows == 0,
            summary: ValidationSummary {
                total_rows,
                valid_rows,
                invalid_rows,
            },
            preview,
        }
    }

    pub fn has_invalid_rows(&self) -> bool {
        self.summary.invalid_rows > 0
    }

    /// Строки для отправки в upload: только без ошибок, порядок файла сохраняется
    pub fn upload_rows(&self) -> Vec<R::Upload> {
        self.preview
            .iter()
            .filter(|r| r.is_valid())
            .map(|r| r.data.to_upload())
            .collect()
    }

    /// Проверка отчёта, пришедшего по сети: флаг и сводка согласованы со строками
    pub fn is_consistent(&self) -> bool {
        let valid_rows = self.preview.iter().filter(|r| r.is_valid()).count();
        self.summary.total_rows == self.preview.len()
            && self.summary.valid_rows == valid_rows
            && self.summary.invalid_rows == self.preview.len() - valid_rows
            && self.valid == (valid_rows == self.preview.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u101_bulk_import::rows::TeamRow;

    fn team(row: usize, name: &str, errors: &[&str]) -> ValidationRow<TeamRow> {
        ValidationRow {
            data: TeamRow {
                row,
                team_name: name.to_string(),
                team_id: None,
            },
            errors: errors.iter().map(|e| e.to_string()).collect(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_valid_iff_no_row_has_errors() {
        let ok = ValidationReport::from_preview(vec![team(1, "A", &[]), team(2, "B", &[])]);
        assert!(ok.valid);
        assert!(!ok.has_invalid_rows());

        let bad = ValidationReport::from_preview(vec![team(1, "A", &[]), team(2, "", &["Team name is required."])]);
        assert!(!bad.valid);
        assert_eq!(
            bad.summary,
            ValidationSummary {
                total_rows: 2,
                valid_rows: 1,
                invalid_rows: 1
            }
        );
    }

    #[test]
    fn test_empty_preview_is_valid() {
        let report = ValidationReport::<TeamRow>::from_preview(Vec::new());
        assert!(report.valid);
        assert!(report.upload_rows().is_empty());
    }

    #[test]
    fn test_upload_rows_skip_errors_and_keep_order() {
        let report = ValidationReport::from_preview(vec![
            team(1, "A", &[]),
            team(2, "B", &["bad email"]),
            team(3, "C", &[]),
        ]);
        let rows: Vec<usize> = report.upload_rows().iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![1, 3]);
    }

    #[test]
    fn test_wire_format_flattens_row() {
        let report = ValidationReport::from_preview(vec![team(1, "A", &[])]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "valid": true,
                "summary": {"totalRows": 1, "validRows": 1, "invalidRows": 0},
                "preview": [{"row": 1, "teamName": "A", "errors": [], "warnings": []}]
            })
        );
        let back: ValidationReport<TeamRow> = serde_json::from_value(json).unwrap();
        assert!(back.is_consistent());
    }

    #[test]
    fn test_inconsistent_report_detected() {
        let mut report = ValidationReport::from_preview(vec![team(1, "A", &["dup"])]);
        report.valid = true;
        assert!(!report.is_consistent());
    }
}
