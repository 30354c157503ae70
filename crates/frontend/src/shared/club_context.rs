//! Клуб (tenant), от имени которого работает dashboard.
//! Передаётся backend в заголовке `X-Club-Id` каждого запроса.

use leptos::prelude::*;

const STORAGE_KEY: &str = "club_id";
pub const DEFAULT_CLUB: &str = "default-club";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

#[derive(Clone, Copy)]
pub struct ClubContext {
    pub club_id: RwSignal<String>,
}

impl ClubContext {
    /// Клуб из localStorage, иначе клуб по умолчанию
    pub fn load() -> Self {
        let saved = storage()
            .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CLUB.to_string());
        Self {
            club_id: RwSignal::new(saved),
        }
    }

    pub fn set(&self, club_id: String) {
        let club_id = club_id.trim().to_lowercase();
        if club_id.is_empty() {
            return;
        }
        if let Some(s) = storage() {
            let _ = s.set_item(STORAGE_KEY, &club_id);
        }
        self.club_id.set(club_id);
    }
}

pub fn use_club() -> ClubContext {
    use_context::<ClubContext>().expect("ClubContext not found in context")
}
