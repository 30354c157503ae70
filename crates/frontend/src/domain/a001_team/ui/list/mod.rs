use crate::shared::api_utils::api_url;
use crate::shared::club_context::use_club;
use crate::shared::format::format_timestamp;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::usecases::u101_bulk_import::TeamCsvImport;
use contracts::domain::a001_team::aggregate::Team;
use contracts::domain::common::AggregateId;
use contracts::system::tenant::CLUB_HEADER;
use contracts::usecases::u101_bulk_import::UploadResult;
use gloo_net::http::Request;
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct TeamListRow {
    pub id: String,
    pub code: String,
    pub name: String,
    pub created_at: String,
}

impl From<Team> for TeamListRow {
    fn from(t: Team) -> Self {
        Self {
            id: t.base.id.as_string(),
            code: t.base.code,
            name: t.base.description,
            created_at: format_timestamp(t.base.metadata.created_at),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn TeamList(
    /// Изменение состава команд (после импорта)
    #[prop(optional)]
    on_changed: Option<Callback<()>>,
) -> impl IntoView {
    let club = use_club().club_id;
    let (items, set_items) = signal::<Vec<TeamListRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (show_import, set_show_import) = signal(false);

    let fetch = move || {
        let club_id = club.get_untracked();
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_teams(&club_id).await {
                Ok(v) => {
                    set_items.set(v.into_iter().map(Into::into).collect());
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    // Перезагрузка при смене клуба
    Effect::new(move || {
        club.track();
        fetch();
    });

    let on_import_complete = Callback::new(move |result: UploadResult| {
        log::info!("Teams import finished: {}", result.summary);
        fetch();
        if let Some(cb) = on_changed {
            cb.run(());
        }
    });

    view! {
        <PageFrame page_id="a001_team--list" category=PAGE_CAT_LIST>
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Teams"}</h1>
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
                        <TeamCsvImport
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
                            <th class="table__header-cell">{"Code"}</th>
                            <th class="table__header-cell">{"Name"}</th>
                            <th class="table__header-cell">{"Created"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || items.get().into_iter().map(|row| view! {
                            <tr class="table__row" data-id=row.id>
                                <td class="table__cell">{row.code}</td>
                                <td class="table__cell">{row.name}</td>
                                <td class="table__cell">{row.created_at}</td>
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        </PageFrame>
    }
}

pub async fn fetch_teams(club_id: &str) -> Result<Vec<Team>, String> {
    let response = Request::get(&api_url("/api/team"))
        .header(CLUB_HEADER, club_id)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch teams: {}", response.status()));
    }

    response
        .json::<Vec<Team>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
