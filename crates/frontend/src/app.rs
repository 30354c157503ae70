use crate::domain::a001_team::ui::list::TeamList;
use crate::domain::a002_player::ui::list::PlayerList;
use crate::shared::club_context::ClubContext;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Клуб (tenant) доступен всем страницам через context
    let club = ClubContext::load();
    provide_context(club);

    // Импорт команд меняет названия команд в списке игроков
    let (players_reload, set_players_reload) = signal(0u32);
    let on_teams_changed = Callback::new(move |_: ()| set_players_reload.update(|n| *n += 1));

    view! {
        <div class="app">
            <div class="top-header">
                <span class="top-header__title">"Team roster"</span>
                <label class="top-header__club">
                    "Club: "
                    <input
                        type="text"
                        prop:value=move || club.club_id.get()
                        on:change=move |ev| club.set(event_target_value(&ev))
                    />
                </label>
            </div>
            <div class="app__content">
                <TeamList on_changed=on_teams_changed />
                <PlayerList reload=players_reload />
            </div>
        </div>
    }
}
