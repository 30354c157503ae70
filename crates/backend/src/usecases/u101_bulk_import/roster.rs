use contracts::domain::a001_team::Team;
use contracts::domain::a002_player::Player;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Снимок состава клуба для проверки строк импорта:
/// существующие команды (по id и названию) и игроки (по id и email).
/// Отдельно хранятся id из файла, уже занятые в других клубах.
#[derive(Debug, Clone, Default)]
pub struct RosterSnapshot {
    team_names: HashMap<Uuid, String>,
    team_ids_by_name: HashMap<String, Uuid>,
    player_ids: HashSet<Uuid>,
    player_emails: HashSet<String>,
    foreign_team_ids: HashSet<Uuid>,
    foreign_player_ids: HashSet<Uuid>,
}

impl RosterSnapshot {
    pub fn new(teams: &[Team], players: &[Player]) -> Self {
        let mut snapshot = Self::default();
        for team in teams {
            snapshot.add_team(team.base.id.value(), team.name());
        }
        for player in players {
            snapshot.add_player(player.base.id.value(), player.email.as_deref());
        }
        snapshot
    }

    pub fn add_team(&mut self, id: Uuid, name: &str) {
        self.team_names.insert(id, name.trim().to_string());
        self.team_ids_by_name
            .entry(Team::name_key(name))
            .or_insert(id);
    }

    pub fn add_player(&mut self, id: Uuid, email: Option<&str>) {
        self.player_ids.insert(id);
        if let Some(email) = email {
            self.player_emails.insert(email_key(email));
        }
    }

    pub fn has_team(&self, id: Uuid) -> bool {
        self.team_names.contains_key(&id)
    }

    pub fn team_id_by_name(&self, name: &str) -> Option<Uuid> {
        self.team_ids_by_name.get(&Team::name_key(name)).copied()
    }

    pub fn has_player(&self, id: Uuid) -> bool {
        self.player_ids.contains(&id)
    }

    pub fn has_player_email(&self, email: &str) -> bool {
        self.player_emails.contains(&email_key(email))
    }

    pub fn mark_foreign_team(&mut self, id: Uuid) {
        self.foreign_team_ids.insert(id);
    }

    pub fn mark_foreign_player(&mut self, id: Uuid) {
        self.foreign_player_ids.insert(id);
    }

    pub fn is_foreign_team(&self, id: Uuid) -> bool {
        self.foreign_team_ids.contains(&id)
    }

    pub fn is_foreign_player(&self, id: Uuid) -> bool {
        self.foreign_player_ids.contains(&id)
    }
}

pub fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}
