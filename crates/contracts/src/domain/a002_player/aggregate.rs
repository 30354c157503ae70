use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::a001_team::TeamId;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};

/// Максимальная длина имени игрока
pub const PLAYER_NAME_MAX_LEN: usize = 100;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
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

impl AggregateId for PlayerId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s.trim())
            .map(PlayerId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Игрок команды. Имя хранится в `base.description`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    #[serde(flatten)]
    pub base: BaseAggregate<PlayerId>,

    #[serde(rename = "teamId")]
    pub team_id: TeamId,

    pub email: Option<String>,
}

impl Player {
    /// Создать нового игрока для вставки в БД
    pub fn new_for_insert(
        id: Option<PlayerId>,
        club_id: String,
        team_id: TeamId,
        name: String,
        email: Option<String>,
    ) -> Self {
        let id = id.unwrap_or_else(PlayerId::new_v4);
        let code = format!("PL-{}", &id.as_string()[..8]);
        Self {
            base: BaseAggregate::new(id, club_id, code, name.trim().to_string()),
            team_id,
            email: email
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty()),
        }
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        validate_player_name(&self.base.description)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

/// Проверка имени игрока
pub fn validate_player_name(name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Player name is required.".into());
    }
    if name.chars().count() > PLAYER_NAME_MAX_LEN {
        return Err(format!(
            "Player name must be at most {} characters.",
            PLAYER_NAME_MAX_LEN
        ));
    }
    Ok(())
}

/// Упрощённая проверка email: одна `@`, непустая локальная часть,
/// домен с точкой и без пробелов
pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    let invalid = || Err(format!("Invalid email address: {}", email));

    if email.chars().any(char::is_whitespace) {
        return invalid();
    }
    let Some((local, domain)) = email.split_once('@') else {
        return invalid();
    };
    if local.is_empty() || domain.contains('@') {
        return invalid();
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return invalid();
    }
    Ok(())
}

impl AggregateRoot for Player {
    type Id = PlayerId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "player"
    }

    fn element_name() -> &'static str {
        "Player"
    }

    fn list_name() -> &'static str {
        "Players"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("coach@club.org").is_ok());
        assert!(validate_email(" kid.one@mail.example.com ").is_ok());
        assert!(validate_email("bad email").is_err());
        assert!(validate_email("no-at.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a@b..com").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }

    #[test]
    fn test_new_for_insert_normalizes_email() {
        let player = Player::new_for_insert(
            None,
            "club-1".into(),
            TeamId::new_v4(),
            "Sam Lee".into(),
            Some("  Sam@Example.COM ".into()),
        );
        assert_eq!(player.email.as_deref(), Some("sam@example.com"));
        assert!(player.base.code.starts_with("PL-"));

        let no_email = Player::new_for_insert(
            None,
            "club-1".into(),
            TeamId::new_v4(),
            "Ana".into(),
            Some("   ".into()),
        );
        assert_eq!(no_email.email, None);
    }
}
