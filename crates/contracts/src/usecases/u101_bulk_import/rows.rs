use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::Debug;

use super::ImportKind;

/// Строка CSV файла, прошедшая разбор (без ошибок/предупреждений)
///
/// `row_number` — позиция строки данных в исходном файле (с 1, без заголовка);
/// сохраняется на всём пути validate → upload → результат.
pub trait ImportRow: Clone + PartialEq + Debug + Serialize + DeserializeOwned {
    /// Полезная нагрузка одной строки в запросе upload
    type Upload: Clone + PartialEq + Debug + Serialize + DeserializeOwned;

    const KIND: ImportKind;

    fn row_number(&self) -> usize;

    fn to_upload(&self) -> Self::Upload;

    /// Заголовки колонок таблицы предпросмотра
    fn preview_columns() -> &'static [&'static str];

    /// Значения ячеек предпросмотра (в порядке `preview_columns`)
    fn preview_cells(&self) -> Vec<String>;
}

// ============================================================================
// Teams
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRow {
    pub row: usize,
    #[serde(default)]
    pub team_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamUpload {
    pub row: usize,
    pub team_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl ImportRow for TeamRow {
    type Upload = TeamUpload;

    const KIND: ImportKind = ImportKind::Teams;

    fn row_number(&self) -> usize {
        self.row
    }

    fn to_upload(&self) -> TeamUpload {
        TeamUpload {
            row: self.row,
            team_name: self.team_name.clone(),
            team_id: self.team_id.clone(),
        }
    }

    fn preview_columns() -> &'static [&'static str] {
        &["Team name", "Team ID"]
    }

    fn preview_cells(&self) -> Vec<String> {
        vec![
            self.team_name.clone(),
            self.team_id.clone().unwrap_or_default(),
        ]
    }
}

// ============================================================================
// Players
// ============================================================================

/// Строка импорта игроков. `team_name` разрешается в `team_id` при валидации.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRow {
    pub row: usize,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpload {
    pub row: usize,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub team_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
}

impl ImportRow for PlayerRow {
    type Upload = PlayerUpload;

    const KIND: ImportKind = ImportKind::Players;

    fn row_number(&self) -> usize {
        self.row
    }

    fn to_upload(&self) -> PlayerUpload {
        PlayerUpload {
            row: self.row,
            name: self.name.clone(),
            email: self.email.clone(),
            // Строка без ошибок всегда имеет разрешённую команду;
            // пустое значение backend отклонит как ошибку строки
            team_id: self.team_id.clone().unwrap_or_default(),
            player_id: self.player_id.clone(),
        }
    }

    fn preview_columns() -> &'static [&'static str] {
        &["Name", "Email", "Team", "Player ID"]
    }

    fn preview_cells(&self) -> Vec<String> {
        let team = match (&self.team_name, &self.team_id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => id.clone(),
            (None, None) => String::new(),
        };
        vec![
            self.name.clone(),
            self.email.clone().unwrap_or_default(),
            team,
            self.player_id.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_row_wire_format() {
        let row: TeamRow = serde_json::from_str(r#"{"row":2,"teamName":"U12 Hawks"}"#).unwrap();
        assert_eq!(row.team_name, "U12 Hawks");
        assert_eq!(row.team_id, None);

        let upload = serde_json::to_value(row.to_upload()).unwrap();
        assert_eq!(upload, serde_json::json!({"row": 2, "teamName": "U12 Hawks"}));
    }

    #[test]
    fn test_player_upload_carries_resolved_team() {
        let row = PlayerRow {
            row: 4,
            name: "Sam Lee".into(),
            email: Some("sam@example.com".into()),
            team_id: Some("6f1c2a10-0000-4000-8000-000000000001".into()),
            team_name: Some("U12 Hawks".into()),
            player_id: None,
        };
        let upload = serde_json::to_value(row.to_upload()).unwrap();
        assert_eq!(
            upload,
            serde_json::json!({
                "row": 4,
                "name": "Sam Lee",
                "email": "sam@example.com",
                "teamId": "6f1c2a10-0000-4000-8000-000000000001"
            })
        );
        assert_eq!(row.preview_cells()[2], "U12 Hawks");
    }
}
