use contracts::system::tenant::ClubId;
use contracts::usecases::common::{UseCaseError, UseCaseMetadata, UseCaseResult};
use contracts::usecases::u101_bulk_import::{
    PlayerRow, PlayerUpload, TeamRow, TeamUpload, U101BulkImport, UploadResult, ValidationReport,
};

use super::csv_reader::{read_csv, CsvTable};
use super::executor;
use super::store::{snapshot_with_ids, RosterStore};
use super::validator;
use crate::shared::config::ImportConfig;
use crate::shared::format::format_size;

fn check_file_size(len: usize, limits: &ImportConfig) -> UseCaseResult<()> {
    if len > limits.max_file_bytes {
        return Err(UseCaseError::validation(format!(
            "File exceeds the maximum size of {}.",
            format_size(limits.max_file_bytes)
        )));
    }
    Ok(())
}

fn parse_file(bytes: &[u8], limits: &ImportConfig) -> UseCaseResult<CsvTable> {
    check_file_size(bytes.len(), limits)?;
    read_csv(bytes, limits.max_rows)
}

/// Validate шаг для команд: CSV → отчёт с предпросмотром
pub async fn validate_teams_csv(
    store: &dyn RosterStore,
    club: &ClubId,
    bytes: &[u8],
    limits: &ImportConfig,
) -> UseCaseResult<ValidationReport<TeamRow>> {
    let table = parse_file(bytes, limits)?;
    let rows = validator::team_rows(&table)?;
    let team_ids = validator::listed_ids(rows.iter().map(|r| r.team_id.as_deref()));
    let roster = snapshot_with_ids(store, club, &team_ids, &[]).await?;
    let report = validator::validate_teams(rows, &roster);
    tracing::info!(
        "{}: validated teams CSV for club {}: {} rows, {} invalid",
        U101BulkImport::full_name(),
        club,
        report.summary.total_rows,
        report.summary.invalid_rows
    );
    Ok(report)
}

/// Validate шаг для игроков: teamName разрешается в teamId
pub async fn validate_players_csv(
    store: &dyn RosterStore,
    club: &ClubId,
    bytes: &[u8],
    limits: &ImportConfig,
) -> UseCaseResult<ValidationReport<PlayerRow>> {
    let table = parse_file(bytes, limits)?;
    let rows = validator::player_rows(&table)?;
    let player_ids = validator::listed_ids(rows.iter().map(|r| r.player_id.as_deref()));
    let roster = snapshot_with_ids(store, club, &[], &player_ids).await?;
    let report = validator::validate_players(rows, &roster);
    tracing::info!(
        "{}: validated players CSV for club {}: {} rows, {} invalid",
        U101BulkImport::full_name(),
        club,
        report.summary.total_rows,
        report.summary.invalid_rows
    );
    Ok(report)
}

pub async fn upload_teams(
    store: &dyn RosterStore,
    club: &ClubId,
    rows: Vec<TeamUpload>,
    limits: &ImportConfig,
) -> UseCaseResult<UploadResult> {
    executor::upload_teams(store, club, rows, limits.max_rows).await
}

pub async fn upload_players(
    store: &dyn RosterStore,
    club: &ClubId,
    rows: Vec<PlayerUpload>,
    limits: &ImportConfig,
) -> UseCaseResult<UploadResult> {
    executor::upload_players(store, club, rows, limits.max_rows).await
}
