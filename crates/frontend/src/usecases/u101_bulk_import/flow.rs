//! Состояние CSV импорта: выбор файла → validate → просмотр ошибок → upload → итоги.
//!
//! Модель не зависит от DOM и сети: виджет вызывает `begin_*` перед запросом
//! и `complete_*` с результатом. Ответ на запрос, начатый до `cancel` или
//! выбора нового файла, отбрасывается по несовпадению `Ticket`.

use contracts::usecases::u101_bulk_import::{
    ImportRow, UploadRequest, UploadResult, ValidationReport,
};

pub const MSG_NO_FILE: &str = "Please select a CSV file to upload.";
pub const MSG_NO_VALID_ROWS: &str = "No valid rows to upload.";
pub const MSG_ADVISORY: &str = "Some rows have validation errors. Please review before uploading.";
pub const VALIDATE_FALLBACK: &str = "Failed to validate CSV file.";
pub const UPLOAD_FALLBACK: &str = "Failed to upload rows.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowStage {
    #[default]
    Idle,
    FileSelected,
    Validating,
    Validated,
    Uploading,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Действие невозможно с текущими данными; сообщение уже показано в `error`
    Input(String),
    /// Запрос уже выполняется
    Busy,
}

/// Метка запроса; ответ принимается только для последнего начатого запроса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
pub struct ImportFlow<R: ImportRow, F: Clone> {
    stage: FlowStage,
    file: Option<F>,
    validation: Option<ValidationReport<R>>,
    results: Option<UploadResult>,
    error: Option<String>,
    epoch: u64,
}

impl<R: ImportRow, F: Clone> Default for ImportFlow<R, F> {
    fn default() -> Self {
        Self {
            stage: FlowStage::Idle,
            file: None,
            validation: None,
            results: None,
            error: None,
            epoch: 0,
        }
    }
}

impl<R: ImportRow, F: Clone> ImportFlow<R, F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> FlowStage {
        self.stage
    }

    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn validation(&self) -> Option<&ValidationReport<R>> {
        self.validation.as_ref()
    }

    pub fn results(&self) -> Option<&UploadResult> {
        self.results.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.stage, FlowStage::Validating | FlowStage::Uploading)
    }

    fn ensure_idle(&self) -> Result<(), FlowError> {
        if self.is_loading() {
            return Err(FlowError::Busy);
        }
        Ok(())
    }

    fn fail(&mut self, message: &str) -> FlowError {
        self.error = Some(message.to_string());
        FlowError::Input(message.to_string())
    }

    fn next_ticket(&mut self) -> Ticket {
        self.epoch += 1;
        Ticket(self.epoch)
    }

    /// Новый файл сбрасывает отчёт, итоги и ошибку
    pub fn select_file(&mut self, file: F) -> Result<(), FlowError> {
        self.ensure_idle()?;
        self.epoch += 1;
        self.file = Some(file);
        self.validation = None;
        self.results = None;
        self.error = None;
        self.stage = FlowStage::FileSelected;
        Ok(())
    }

    /// Начать validate: возвращает файл для отправки. Прежний отчёт и итоги сбрасываются
    pub fn begin_validation(&mut self) -> Result<(Ticket, F), FlowError> {
        self.ensure_idle()?;
        let file = match self.file.clone() {
            Some(file) => file,
            None => return Err(self.fail(MSG_NO_FILE)),
        };
        self.validation = None;
        self.results = None;
        self.error = None;
        self.stage = FlowStage::Validating;
        Ok((self.next_ticket(), file))
    }

    /// Ошибка validate возвращает к выбранному файлу
    pub fn complete_validation(
        &mut self,
        ticket: Ticket,
        result: Result<ValidationReport<R>, String>,
    ) {
        if ticket.0 != self.epoch || self.stage != FlowStage::Validating {
            return;
        }
        match result {
            Ok(report) => {
                self.validation = Some(report);
                self.stage = FlowStage::Validated;
            }
            Err(message) => {
                self.error = Some(message);
                self.stage = FlowStage::FileSelected;
            }
        }
    }

    pub fn advisory(&self) -> Option<&'static str> {
        self.validation
            .as_ref()
            .filter(|r| r.has_invalid_rows())
            .map(|_| MSG_ADVISORY)
    }

    /// Upload доступен только для полностью валидного отчёта
    pub fn can_upload(&self) -> bool {
        self.stage == FlowStage::Validated
            && self.validation.as_ref().map(|r| r.valid).unwrap_or(false)
    }

    /// Начать upload: в запрос попадают только строки без ошибок, в порядке файла
    pub fn begin_upload(&mut self) -> Result<(Ticket, UploadRequest<R::Upload>), FlowError> {
        self.ensure_idle()?;
        let (rows, valid) = match &self.validation {
            Some(report) => (report.upload_rows(), report.valid),
            None => (Vec::new(), false),
        };
        if rows.is_empty() {
            return Err(self.fail(MSG_NO_VALID_ROWS));
        }
        if !valid || self.stage != FlowStage::Validated {
            return Err(self.fail(MSG_ADVISORY));
        }
        self.error = None;
        self.stage = FlowStage::Uploading;
        Ok((self.next_ticket(), UploadRequest::new(rows)))
    }

    /// Возвращает итоги, если они приняты (для callback родителя)
    pub fn complete_upload(
        &mut self,
        ticket: Ticket,
        result: Result<UploadResult, String>,
    ) -> Option<UploadResult> {
        if ticket.0 != self.epoch || self.stage != FlowStage::Uploading {
            return None;
        }
        match result {
            Ok(results) => {
                self.results = Some(results.clone());
                self.stage = FlowStage::Completed;
                Some(results)
            }
            Err(message) => {
                self.error = Some(message);
                self.stage = FlowStage::Validated;
                None
            }
        }
    }

    /// Сброс в исходное состояние; ответы на начатые запросы будут проигнорированы
    pub fn cancel(&mut self) {
        let epoch = self.epoch + 1;
        *self = Self::default();
        self.epoch = epoch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::usecases::u101_bulk_import::{
        PlayerRow, TeamRow, UploadSummary, ValidationRow,
    };

    type TeamFlow = ImportFlow<TeamRow, &'static str>;

    fn team(row: usize, name: &str, errors: &[&str]) -> ValidationRow<TeamRow> {
        let mut r = ValidationRow::new(TeamRow {
            row,
            team_name: name.to_string(),
            team_id: None,
        });
        for e in errors {
            r.error(*e);
        }
        r
    }

    fn validated(rows: Vec<ValidationRow<TeamRow>>) -> TeamFlow {
        let mut flow = TeamFlow::new();
        flow.select_file("teams.csv").unwrap();
        let (ticket, _) = flow.begin_validation().unwrap();
        flow.complete_validation(ticket, Ok(ValidationReport::from_preview(rows)));
        flow
    }

    #[test]
    fn test_validate_without_file() {
        let mut flow = TeamFlow::new();
        let err = flow.begin_validation().unwrap_err();
        assert_eq!(err, FlowError::Input(MSG_NO_FILE.to_string()));
        assert_eq!(flow.error(), Some(MSG_NO_FILE));
        assert_eq!(flow.stage(), FlowStage::Idle);
    }

    #[test]
    fn test_select_file_clears_previous_state() {
        let mut flow = validated(vec![team(1, "A", &[])]);
        let (ticket, _) = flow.begin_upload().unwrap();
        flow.complete_upload(ticket, Err("boom".into()));
        assert!(flow.validation().is_some());
        assert_eq!(flow.error(), Some("boom"));

        flow.select_file("other.csv").unwrap();
        assert_eq!(flow.stage(), FlowStage::FileSelected);
        assert!(flow.validation().is_none());
        assert!(flow.results().is_none());
        assert!(flow.error().is_none());
        assert_eq!(flow.file(), Some(&"other.csv"));
    }

    #[test]
    fn test_validation_failure_returns_to_file_selected() {
        let mut flow = TeamFlow::new();
        flow.select_file("teams.csv").unwrap();
        let (ticket, file) = flow.begin_validation().unwrap();
        assert_eq!(file, "teams.csv");
        assert!(flow.is_loading());

        flow.complete_validation(ticket, Err(VALIDATE_FALLBACK.to_string()));
        assert_eq!(flow.stage(), FlowStage::FileSelected);
        assert_eq!(flow.error(), Some(VALIDATE_FALLBACK));
        assert!(!flow.can_upload());
    }

    #[test]
    fn test_failed_revalidation_drops_previous_report() {
        let mut flow = validated(vec![team(1, "A", &[]), team(2, "", &["Team name is required."])]);
        assert_eq!(flow.advisory(), Some(MSG_ADVISORY));

        let (ticket, _) = flow.begin_validation().unwrap();
        assert!(flow.validation().is_none());
        flow.complete_validation(ticket, Err("boom".into()));
        assert_eq!(flow.stage(), FlowStage::FileSelected);
        assert!(flow.validation().is_none());
        assert!(flow.advisory().is_none());
        assert_eq!(flow.error(), Some("boom"));
    }

    #[test]
    fn test_revalidation_after_upload_drops_results() {
        let mut flow = validated(vec![team(1, "A", &[])]);
        let (ticket, _) = flow.begin_upload().unwrap();
        let mut result = UploadResult::default();
        result.record_created();
        flow.complete_upload(ticket, Ok(result));
        assert_eq!(flow.stage(), FlowStage::Completed);
        assert!(!flow.can_upload());

        let (ticket, _) = flow.begin_validation().unwrap();
        assert!(flow.results().is_none());
        flow.complete_validation(ticket, Ok(ValidationReport::from_preview(vec![team(1, "A", &[])])));
        assert_eq!(flow.stage(), FlowStage::Validated);
        assert!(flow.results().is_none());
    }

    #[test]
    fn test_single_request_in_flight() {
        let mut flow = TeamFlow::new();
        flow.select_file("teams.csv").unwrap();
        flow.begin_validation().unwrap();
        assert_eq!(flow.begin_validation().unwrap_err(), FlowError::Busy);
        assert_eq!(flow.select_file("x.csv").unwrap_err(), FlowError::Busy);
        assert_eq!(flow.begin_upload().unwrap_err(), FlowError::Busy);
    }

    #[test]
    fn test_upload_disabled_without_valid_report() {
        let mut flow = TeamFlow::new();
        assert!(!flow.can_upload());
        flow.select_file("teams.csv").unwrap();
        assert!(!flow.can_upload());

        let flow = validated(vec![team(1, "A", &[]), team(2, "", &["Team name is required."])]);
        assert!(!flow.can_upload());
    }

    #[test]
    fn test_missing_team_name_shows_advisory() {
        let mut flow = validated(vec![
            team(1, "U12 Hawks", &[]),
            team(2, "", &["Team name is required."]),
            team(3, "U14 Falcons", &[]),
        ]);
        let report = flow.validation().unwrap();
        assert!(!report.valid);
        assert_eq!(report.summary.total_rows, 3);
        assert_eq!(report.summary.valid_rows, 2);
        assert_eq!(report.summary.invalid_rows, 1);
        assert_eq!(flow.advisory(), Some(MSG_ADVISORY));
        assert!(!flow.can_upload());

        let err = flow.begin_upload().unwrap_err();
        assert_eq!(err, FlowError::Input(MSG_ADVISORY.to_string()));
        assert_eq!(flow.stage(), FlowStage::Validated);
    }

    #[test]
    fn test_no_valid_rows() {
        let mut flow = validated(vec![team(1, "", &["Team name is required."])]);
        let err = flow.begin_upload().unwrap_err();
        assert_eq!(err, FlowError::Input(MSG_NO_VALID_ROWS.to_string()));
        assert_eq!(flow.error(), Some(MSG_NO_VALID_ROWS));

        let mut empty = validated(Vec::new());
        assert_eq!(
            empty.begin_upload().unwrap_err(),
            FlowError::Input(MSG_NO_VALID_ROWS.to_string())
        );

        let mut none = TeamFlow::new();
        assert_eq!(
            none.begin_upload().unwrap_err(),
            FlowError::Input(MSG_NO_VALID_ROWS.to_string())
        );
    }

    #[test]
    fn test_upload_success_and_failure() {
        let mut flow = validated(vec![team(1, "A", &[]), team(2, "B", &[])]);
        assert!(flow.advisory().is_none());
        assert!(flow.can_upload());

        let (ticket, request) = flow.begin_upload().unwrap();
        let rows: Vec<usize> = request.rows.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![1, 2]);
        flow.complete_upload(ticket, Err(UPLOAD_FALLBACK.to_string()));
        assert_eq!(flow.stage(), FlowStage::Validated);
        assert_eq!(flow.error(), Some(UPLOAD_FALLBACK));

        let (ticket, _) = flow.begin_upload().unwrap();
        assert!(flow.error().is_none());
        let mut result = UploadResult::default();
        result.record_created();
        result.record_created();
        let done = flow.complete_upload(ticket, Ok(result)).unwrap();
        assert_eq!(flow.stage(), FlowStage::Completed);
        assert_eq!(done.summary.to_string(), "Created: 2 · Skipped: 0 · Errors: 0");
        assert_eq!(flow.results(), Some(&done));
    }

    #[test]
    fn test_players_upload_payload() {
        let mut flow: ImportFlow<PlayerRow, &'static str> = ImportFlow::new();
        flow.select_file("players.csv").unwrap();
        let (ticket, _) = flow.begin_validation().unwrap();
        let player = |row: usize, name: &str| {
            ValidationRow::new(PlayerRow {
                row,
                name: name.to_string(),
                email: None,
                team_id: Some("6f1c3c1e-8a43-4c55-9f4f-0d3c2b1a9e77".into()),
                team_name: Some("U12 Hawks".into()),
                player_id: None,
            })
        };
        flow.complete_validation(
            ticket,
            Ok(ValidationReport::from_preview(vec![player(1, "Sam"), player(2, "Ana")])),
        );

        let (ticket, request) = flow.begin_upload().unwrap();
        assert_eq!(request.rows.len(), 2);
        assert_eq!(request.rows[1].name, "Ana");

        let result = UploadResult {
            summary: UploadSummary {
                created: 2,
                skipped: 0,
                errors: 0,
            },
            ..Default::default()
        };
        assert!(flow.complete_upload(ticket, Ok(result)).is_some());
    }

    #[test]
    fn test_cancel_discards_late_response() {
        let mut flow = TeamFlow::new();
        flow.select_file("teams.csv").unwrap();
        let (ticket, _) = flow.begin_validation().unwrap();

        flow.cancel();
        assert_eq!(flow.stage(), FlowStage::Idle);
        assert!(flow.file().is_none());

        flow.select_file("again.csv").unwrap();
        let (fresh, _) = flow.begin_validation().unwrap();
        flow.complete_validation(ticket, Ok(ValidationReport::from_preview(vec![team(1, "A", &[])])));
        assert_eq!(flow.stage(), FlowStage::Validating);
        assert!(flow.validation().is_none());

        flow.complete_validation(fresh, Ok(ValidationReport::from_preview(vec![team(1, "A", &[])])));
        assert_eq!(flow.stage(), FlowStage::Validated);
    }

    #[test]
    fn test_upload_result_ignored_after_cancel() {
        let mut flow = validated(vec![team(1, "A", &[])]);
        let (ticket, _) = flow.begin_upload().unwrap();
        flow.cancel();
        assert!(flow
            .complete_upload(ticket, Ok(UploadResult::default()))
            .is_none());
        assert!(flow.results().is_none());
        assert_eq!(flow.stage(), FlowStage::Idle);
    }
}
