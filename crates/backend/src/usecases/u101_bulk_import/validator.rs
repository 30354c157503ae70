//! Построчная валидация CSV импорта. Ошибки исключают строку из загрузки,
//! предупреждения только информируют (например, о будущем пропуске).

use contracts::domain::a001_team::aggregate::validate_team_name;
use contracts::domain::a002_player::aggregate::{validate_email, validate_player_name};
use contracts::usecases::common::UseCaseResult;
use contracts::usecases::u101_bulk_import::{PlayerRow, TeamRow, ValidationReport, ValidationRow};
use contracts::domain::a001_team::Team;
use std::collections::HashMap;
use uuid::Uuid;

use super::csv_reader::CsvTable;
use super::roster::{email_key, RosterSnapshot};

// ============================================================================
// CSV → строки
// ============================================================================

pub fn team_rows(table: &CsvTable) -> UseCaseResult<Vec<TeamRow>> {
    table.require_any(&["teamName"])?;
    Ok(table
        .records
        .iter()
        .map(|r| TeamRow {
            row: r.row,
            team_name: r.text("teamName"),
            team_id: r.get("teamId").map(str::to_string),
        })
        .collect())
}

pub fn player_rows(table: &CsvTable) -> UseCaseResult<Vec<PlayerRow>> {
    table.require_any(&["name"])?;
    table.require_any(&["teamId", "teamName"])?;
    Ok(table
        .records
        .iter()
        .map(|r| PlayerRow {
            row: r.row,
            name: r.text("name"),
            email: r.get("email").map(str::to_string),
            team_id: r.get("teamId").map(str::to_string),
            team_name: r.get("teamName").map(str::to_string),
            player_id: r.get("playerId").map(str::to_string),
        })
        .collect())
}

/// Необязательный UUID из ячейки. `Err` — значение есть, но это не UUID.
pub fn parse_optional_uuid(raw: Option<&str>) -> Result<Option<Uuid>, ()> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => Uuid::parse_str(s).map(Some).map_err(|_| ()),
    }
}

// ============================================================================
// Teams
// ============================================================================

/// UUID из ячеек id, пригодные для проверки занятости
pub fn listed_ids<'a>(cells: impl Iterator<Item = Option<&'a str>>) -> Vec<Uuid> {
    cells
        .filter_map(|cell| parse_optional_uuid(cell).ok().flatten())
        .collect()
}

pub fn validate_teams(rows: Vec<TeamRow>, roster: &RosterSnapshot) -> ValidationReport<TeamRow> {
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut ids_seen: HashMap<Uuid, usize> = HashMap::new();
    let mut preview = Vec::with_capacity(rows.len());

    for data in rows {
        let mut row = ValidationRow::new(data);
        let name = row.data.team_name.trim().to_string();

        if let Err(e) = validate_team_name(&name) {
            row.error(e);
        }

        match parse_optional_uuid(row.data.team_id.as_deref()) {
            Err(()) => row.error("Invalid teamId: must be a UUID."),
            Ok(Some(id)) => {
                if let Some(first) = ids_seen.get(&id) {
                    row.error(format!(
                        "Duplicate teamId {} (first seen on row {}).",
                        id, first
                    ));
                } else {
                    ids_seen.insert(id, row.data.row);
                    if roster.has_team(id) {
                        row.warning(format!(
                            "Team ID {} already exists; this row will be skipped.",
                            id
                        ));
                    } else if roster.is_foreign_team(id) {
                        row.error(format!("Team ID {} is already in use.", id));
                    }
                }
            }
            Ok(None) => {}
        }

        if !name.is_empty() {
            let key = Team::name_key(&name);
            if let Some(first) = first_seen.get(&key) {
                row.error(format!(
                    "Duplicate team name \"{}\" (first seen on row {}).",
                    name, first
                ));
            } else {
                first_seen.insert(key, row.data.row);
                if roster.team_id_by_name(&name).is_some() {
                    row.warning(format!(
                        "A team named \"{}\" already exists; this row will be skipped.",
                        name
                    ));
                }
            }
        }

        preview.push(row);
    }

    ValidationReport::from_preview(preview)
}

// ============================================================================
// Players
// ============================================================================

pub fn validate_players(
    rows: Vec<PlayerRow>,
    roster: &RosterSnapshot,
) -> ValidationReport<PlayerRow> {
    let mut emails_seen: HashMap<String, usize> = HashMap::new();
    let mut ids_seen: HashMap<Uuid, usize> = HashMap::new();
    let mut preview = Vec::with_capacity(rows.len());

    for data in rows {
        let mut row = ValidationRow::new(data);

        if let Err(e) = validate_player_name(&row.data.name) {
            row.error(e);
        }

        // Email
        match row.data.email.clone() {
            None => row.warning("No email provided."),
            Some(email) => {
                if let Err(e) = validate_email(&email) {
                    row.error(e);
                } else {
                    let key = email_key(&email);
                    if let Some(first) = emails_seen.get(&key) {
                        row.error(format!(
                            "Duplicate email \"{}\" (first seen on row {}).",
                            key, first
                        ));
                    } else {
                        emails_seen.insert(key.clone(), row.data.row);
                        if roster.has_player_email(&key) {
                            row.warning(format!(
                                "A player with email {} already exists; this row will be skipped.",
                                key
                            ));
                        }
                    }
                }
            }
        }

        // Player ID
        match parse_optional_uuid(row.data.player_id.as_deref()) {
            Err(()) => row.error("Invalid playerId: must be a UUID."),
            Ok(Some(id)) => {
                if let Some(first) = ids_seen.get(&id) {
                    row.error(format!(
                        "Duplicate playerId {} (first seen on row {}).",
                        id, first
                    ));
                } else {
                    ids_seen.insert(id, row.data.row);
                    if roster.has_player(id) {
                        row.warning(format!(
                            "Player ID {} already exists; this row will be skipped.",
                            id
                        ));
                    } else if roster.is_foreign_player(id) {
                        row.error(format!("Player ID {} is already in use.", id));
                    }
                }
            }
            Ok(None) => {}
        }

        // Команда: teamId приоритетнее, teamName разрешается в teamId
        match resolve_team(&row.data, roster) {
            Ok(id) => row.data.team_id = Some(id.to_string()),
            Err(e) => row.error(e),
        }

        preview.push(row);
    }

    ValidationReport::from_preview(preview)
}

fn resolve_team(data: &PlayerRow, roster: &RosterSnapshot) -> Result<Uuid, String> {
    let by_id = match parse_optional_uuid(data.team_id.as_deref()) {
        Err(()) => return Err("Invalid teamId: must be a UUID.".into()),
        Ok(Some(id)) if !roster.has_team(id) => return Err(format!("Team not found: {}", id)),
        Ok(id) => id,
    };

    let by_name = match data.team_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => match roster.team_id_by_name(name) {
            Some(id) => Some(id),
            None => return Err(format!("Team not found: \"{}\"", name)),
        },
        _ => None,
    };

    match (by_id, by_name) {
        (Some(id), Some(named)) if id != named => {
            Err("teamId and teamName refer to different teams.".into())
        }
        (Some(id), _) | (None, Some(id)) => Ok(id),
        (None, None) => Err("Either teamId or teamName is required.".into()),
    }
}
