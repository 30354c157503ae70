use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Что импортируется: команды или игроки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Teams,
    Players,
}

impl ImportKind {
    /// Сегмент URL (`/api/u101/import/{kind}/...`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Teams => "teams",
            ImportKind::Players => "players",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ImportKind::Teams => "Import teams from CSV",
            ImportKind::Players => "Import players from CSV",
        }
    }

    /// Колонки CSV шаблона, в порядке следования
    pub fn template_columns(&self) -> &'static [&'static str] {
        match self {
            ImportKind::Teams => &["teamName", "teamId"],
            ImportKind::Players => &["name", "email", "teamId", "teamName", "playerId"],
        }
    }

    /// Содержимое CSV шаблона для скачивания
    pub fn template_csv(&self) -> String {
        let sample = match self {
            ImportKind::Teams => "U12 Hawks,\nU14 Falcons,\n",
            ImportKind::Players => {
                "Sam Lee,sam@example.com,,U12 Hawks,\nAna Diaz,,,U12 Hawks,\n"
            }
        };
        format!("{}\n{}", self.template_columns().join(","), sample)
    }

    pub fn template_file_name(&self) -> String {
        format!("{}_template.csv", self.as_str())
    }
}

impl FromStr for ImportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "teams" => Ok(ImportKind::Teams),
            "players" => Ok(ImportKind::Players),
            other => Err(format!("Unknown import kind: {}", other)),
        }
    }
}

impl std::fmt::Display for ImportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("teams".parse::<ImportKind>(), Ok(ImportKind::Teams));
        assert_eq!(" Players ".parse::<ImportKind>(), Ok(ImportKind::Players));
        assert!("coaches".parse::<ImportKind>().is_err());
    }

    #[test]
    fn test_template_starts_with_header() {
        let csv = ImportKind::Players.template_csv();
        assert!(csv.starts_with("name,email,teamId,teamName,playerId\n"));
        assert_eq!(ImportKind::Teams.template_file_name(), "teams_template.csv");
    }

    #[test]
    fn test_kind_serde() {
        assert_eq!(serde_json::to_string(&ImportKind::Teams).unwrap(), "\"teams\"");
    }
}
