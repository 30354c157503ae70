use serde::{Deserialize, Serialize};

/// Заголовок запроса, в котором frontend передаёт клуб (тенант)
pub const CLUB_HEADER: &str = "X-Club-Id";

const CLUB_ID_MAX_LEN: usize = 64;

/// Идентификатор клуба. Все команды и игроки видимы только внутри своего клуба.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClubId(String);

impl ClubId {
    /// Разбор значения заголовка: латиница в нижнем регистре, цифры, `-` и `_`
    pub fn parse(raw: &str) -> Result<Self, String> {
        let value = raw.trim();
        if value.is_empty() {
            return Err("Missing club context.".into());
        }
        if value.len() > CLUB_ID_MAX_LEN {
            return Err(format!(
                "Club id must be at most {} characters.",
                CLUB_ID_MAX_LEN
            ));
        }
        let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_';
        if !value.chars().all(allowed) {
            return Err(format!("Invalid club id: {}", value));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClubId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_club_id() {
        assert_eq!(ClubId::parse(" riverside-fc ").unwrap().as_str(), "riverside-fc");
        assert!(ClubId::parse("").is_err());
        assert!(ClubId::parse("Riverside FC").is_err());
        assert!(ClubId::parse(&"a".repeat(65)).is_err());
    }
}
