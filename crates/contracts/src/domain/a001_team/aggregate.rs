use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};

/// Максимальная длина названия команды
pub const TEAM_NAME_MAX_LEN: usize = 100;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор команды
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub Uuid);

impl TeamId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for TeamId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s.trim())
            .map(TeamId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Команда клуба. Название хранится в `base.description`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    #[serde(flatten)]
    pub base: BaseAggregate<TeamId>,
}

impl Team {
    /// Создать новую команду для вставки в БД
    pub fn new_for_insert(id: Option<TeamId>, club_id: String, name: String) -> Self {
        let id = id.unwrap_or_else(TeamId::new_v4);
        let code = format!("TM-{}", &id.as_string()[..8]);
        Self {
            base: BaseAggregate::new(id, club_id, code, name.trim().to_string()),
        }
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    /// Ключ для сравнения названий без учёта регистра
    pub fn name_key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        validate_team_name(&self.base.description)
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

/// Проверка названия команды (общая для формы и импорта)
pub fn validate_team_name(name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Team name is required.".into());
    }
    if name.chars().count() > TEAM_NAME_MAX_LEN {
        return Err(format!(
            "Team name must be at most {} characters.",
            TEAM_NAME_MAX_LEN
        ));
    }
    Ok(())
}

impl AggregateRoot for Team {
    type Id = TeamId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "team"
    }

    fn element_name() -> &'static str {
        "Team"
    }

    fn list_name() -> &'static str {
        "Teams"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_for_insert_trims_and_codes() {
        let team = Team::new_for_insert(None, "club-1".into(), "  U12 Hawks ".into());
        assert_eq!(team.name(), "U12 Hawks");
        assert!(team.base.code.starts_with("TM-"));
        assert_eq!(team.base.code.len(), 11);
        assert!(team.validate().is_ok());
    }

    #[test]
    fn test_validate_team_name() {
        assert!(validate_team_name("   ").is_err());
        assert!(validate_team_name(&"x".repeat(TEAM_NAME_MAX_LEN)).is_ok());
        assert!(validate_team_name(&"x".repeat(TEAM_NAME_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn test_full_name() {
        assert_eq!(Team::full_name(), "a001_team");
    }
}
