use crate::domain::a001_team::ui::list::fetch_teams;
use crate::shared::api_utils::api_url;
use crate::shared::club_context::use_club;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::usecases::u101_bulk_import::PlayerCsvImport;
use contracts::domain::a002_player::aggregate::Player;
use contracts::domain::common::AggregateId;
use contracts::system::tenant::CLUB_HEADER;
use contracts::usecases::u101_bulk_import::UploadResult;
use gloo_net::http::Request;
use leptos::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct PlayerListRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub team: String,
}

impl PlayerListRow {
    fn new(p: Player, team_names: &HashMap<String, String>) -> Self {
        let team_id = p.team_id.as_string();
        Self {
            id: p.base.id.as_string(),
            name: p.base.description,
            email: p.email.unwrap_or_else(|| "-".to_string()),
            team: team_names.get(&team_id).cloned().unwrap_or(team_id),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn PlayerList(
    /// Сигнал перезагрузки извне (например, после импорта команд)
    #[prop(optional)]
    reload: Option<ReadSignal<u32>>,
) -> impl IntoView {
    let club = use_club().club_id;
    let (items, set_items) = signal::<Vec<PlayerListRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (show_import, set_show_import) = signal(false);

    let fetch = move || {
        let club_id = club.get_untracked();
        wasm_bindgen_futures::spawn_local(async move {
            let loaded = async {
                let teams = fetch_teams(&club_id).await?;
                let players = fetch_players(&club_id).await?;
                let names: HashMap<String, String> = teams
                    .into_iter()
                    .map(|t| (t.base.id.as_string(), t.base.description))
                    .collect();
                Ok::<_, String>(
                    players
                        .into_iter()
                        .map(|p| PlayerListRow::new(p, &names))
                        .collect::<Vec<_>>(),
                )
            };
            match loaded.await {
                Ok(rows) => {
                    set_items.set(rows);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    Effect::new(move || {
        club.track();
        if let Some(reload) = reload {
            reload.track();
        }
        fetch();
    });

    let on_import_complete = Callback::new(move |result: UploadResult| {
        log::info!("Players import finished: {}", result.summary);
        fetch();
    });

    view! {
        <PageFrame page_id="a002_player--list" category=PAGE_CAT_LIST>
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Players"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| set_show_import.set(true)>
                        {icon("upload")}
                        {"Import CSV"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        {"Refresh"}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Show when=move || show_import.get()>
                <div class="modal-overlay">
                    <div class="modal">
                        <PlayerCsvImport
                            on_complete=on_import_complete
                            on_close=Callback::new(move |_: ()| set_show_import.set(false))
                        />
                    </div>
                </div>
            </Show>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"Name"}</th>
                            <th class="table__header-cell">{"Email"}</th>
                            <th class="table__header-cell">{"Team"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || items.get().into_iter().map(|row| view! {
                            <tr class="table__row" data-id=row.id>
                                <td class="table__cell">{row.name}</td>
                                <td class="table__cell">{row.email}</td>
                                <td class="table__cell">{row.team}</td>
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        </PageFrame>
    }
}

async fn fetch_players(club_id: &str) -> Result<Vec<Player>, String> {
    let response = Request::get(&api_url("/api/player"))
        .header(CLUB_HEADER, club_id)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch players: {}", response.status()));
    }

    response
        .json::<Vec<Player>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
