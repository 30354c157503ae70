use super::api;
use super::flow::{FlowError, FlowStage, ImportFlow, UPLOAD_FALLBACK, VALIDATE_FALLBACK};
use crate::shared::club_context::use_club;
use crate::shared::format::import_limits_hint;
use crate::shared::icons::icon;
use contracts::usecases::u101_bulk_import::{
    ImportRow, PlayerRow, TeamRow, UploadResult, ValidationReport, ValidationRow,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::File;

fn row_class<R>(row: &ValidationRow<R>) -> &'static str {
    if !row.errors.is_empty() {
        "table__row csv-import__row--error"
    } else if !row.warnings.is_empty() {
        "table__row csv-import__row--warning"
    } else {
        "table__row"
    }
}

fn preview_table<R: ImportRow>(report: ValidationReport<R>) -> impl IntoView {
    let summary = report.summary;
    view! {
        <div class="csv-import__summary">
            {format!(
                "Total: {} · Valid: {} · Invalid: {}",
                summary.total_rows, summary.valid_rows, summary.invalid_rows
            )}
        </div>
        <div class="table">
            <table class="table__data table--striped">
                <thead class="table__head">
                    <tr>
                        <th class="table__header-cell">"Row"</th>
                        {R::preview_columns()
                            .iter()
                            .map(|c| view! { <th class="table__header-cell">{*c}</th> })
                            .collect_view()}
                        <th class="table__header-cell">"Issues"</th>
                    </tr>
                </thead>
                <tbody>
                    {report
                        .preview
                        .into_iter()
                        .map(|row| {
                            let class = row_class(&row);
                            view! {
                                <tr class=class>
                                    <td class="table__cell">{row.data.row_number()}</td>
                                    {row
                                        .data
                                        .preview_cells()
                                        .into_iter()
                                        .map(|v| view! { <td class="table__cell">{v}</td> })
                                        .collect_view()}
                                    <td class="table__cell">
                                        {row
                                            .errors
                                            .into_iter()
                                            .map(|e| view! { <div class="csv-import__issue csv-import__issue--error">{e}</div> })
                                            .collect_view()}
                                        {row
                                            .warnings
                                            .into_iter()
                                            .map(|w| view! { <div class="csv-import__issue csv-import__issue--warning">{w}</div> })
                                            .collect_view()}
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

fn results_view(result: UploadResult) -> impl IntoView {
    view! {
        <div class="csv-import__results">
            <div class="csv-import__summary csv-import__summary--done">{result.summary.to_string()}</div>
            {(!result.skipped.is_empty()).then(|| view! {
                <div class="csv-import__list">
                    <h4>"Skipped"</h4>
                    <ul>
                        {result
                            .skipped
                            .into_iter()
                            .map(|s| view! { <li>{format!("Row {}: {}", s.row, s.reason)}</li> })
                            .collect_view()}
                    </ul>
                </div>
            })}
            {(!result.errors.is_empty()).then(|| view! {
                <div class="csv-import__list csv-import__list--error">
                    <h4>"Errors"</h4>
                    <ul>
                        {result
                            .errors
                            .into_iter()
                            .map(|e| view! { <li>{format!("Row {}: {}", e.row, e.error)}</li> })
                            .collect_view()}
                    </ul>
                </div>
            })}
        </div>
    }
}

/// Виджет импорта CSV для одного вида строк
fn csv_importer<R>(on_complete: Callback<UploadResult>, on_close: Callback<()>) -> impl IntoView
where
    R: ImportRow + Send + Sync + 'static,
{
    let club = use_club().club_id;
    let flow: RwSignal<ImportFlow<R, File>, LocalStorage> = RwSignal::new_local(ImportFlow::new());
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let is_loading = Signal::derive(move || flow.with(|f| f.is_loading()));

    let handle_file_select = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            if let Some(Err(FlowError::Busy)) = flow.try_update(|f| f.select_file(file)) {
                log::debug!("u101: file change ignored while a request is running");
            }
        }
    };

    let handle_validate = move |_| {
        let Some(Ok((ticket, file))) = flow.try_update(|f| f.begin_validation()) else {
            return;
        };
        let club_id = club.get_untracked();
        spawn_local(async move {
            let result = api::validate::<R>(&club_id, &file).await.map_err(|e| {
                log::warn!("u101: validate {} failed: {}", R::KIND, e);
                e.message_or(VALIDATE_FALLBACK)
            });
            // None: виджет уже закрыт, результат не нужен
            flow.try_update(|f| f.complete_validation(ticket, result));
        });
    };

    let handle_upload = move |_| {
        let Some(Ok((ticket, request))) = flow.try_update(|f| f.begin_upload()) else {
            return;
        };
        let club_id = club.get_untracked();
        log::info!("u101: uploading {} {} rows", request.rows.len(), R::KIND);
        spawn_local(async move {
            let result = api::upload::<R>(&club_id, &request).await.map_err(|e| {
                log::warn!("u101: upload {} failed: {}", R::KIND, e);
                e.message_or(UPLOAD_FALLBACK)
            });
            if let Some(Some(done)) = flow.try_update(|f| f.complete_upload(ticket, result)) {
                on_complete.run(done);
            }
        });
    };

    let reset = move || {
        flow.update(|f| f.cancel());
        if let Some(input) = input_ref.get() {
            input.set_value("");
        }
    };

    let template_href = api::template_url(R::KIND);

    view! {
        <div class="csv-import">
            <div class="modal-header csv-import__header">
                <h3 class="modal-title">{R::KIND.title()}</h3>
                <div class="modal-header-actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| {
                            reset();
                            on_close.run(());
                        }
                    >
                        {icon("x")}
                        " Close"
                    </Button>
                </div>
            </div>

            <div class="modal-body csv-import__body">
                <div class="csv-import__filebar">
                    <input
                        type="file"
                        accept=".csv,text/csv"
                        node_ref=input_ref
                        on:change=handle_file_select
                        disabled=move || is_loading.get()
                    />
                    <a class="csv-import__template" href=template_href download="">
                        {icon("file")}
                        " Download template"
                    </a>
                    <span class="csv-import__hint">{import_limits_hint()}</span>
                </div>

                <div class="csv-import__actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=handle_validate
                        disabled=Signal::derive(move || {
                            flow.with(|f| f.is_loading() || f.file().is_none())
                        })
                    >
                        "Validate"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=handle_upload
                        disabled=Signal::derive(move || !flow.with(|f| f.can_upload()))
                    >
                        {icon("upload")}
                        " Upload"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| reset()
                    >
                        "Cancel"
                    </Button>
                    <Show when=move || is_loading.get()>
                        <Space gap=SpaceGap::Small>
                            <Spinner />
                            <span>
                                {move || match flow.with(|f| f.stage()) {
                                    FlowStage::Uploading => "Uploading...",
                                    _ => "Validating...",
                                }}
                            </span>
                        </Space>
                    </Show>
                </div>

                {move || flow.with(|f| f.error().map(str::to_string)).map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}

                {move || flow.with(|f| f.advisory()).map(|text| view! {
                    <div class="warning-box">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{text}</span>
                    </div>
                })}

                {move || flow.with(|f| f.results().cloned()).map(results_view)}

                {move || flow.with(|f| f.validation().cloned()).map(preview_table)}
            </div>
        </div>
    }
}

/// Импорт команд из CSV
#[component]
pub fn TeamCsvImport(
    /// Вызывается с итогами успешной загрузки (например, обновить список)
    on_complete: Callback<UploadResult>,
    on_close: Callback<()>,
) -> impl IntoView {
    csv_importer::<TeamRow>(on_complete, on_close)
}

/// Импорт игроков из CSV
#[component]
pub fn PlayerCsvImport(
    on_complete: Callback<UploadResult>,
    on_close: Callback<()>,
) -> impl IntoView {
    csv_importer::<PlayerRow>(on_complete, on_close)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_class() {
        let mut row = ValidationRow::new(TeamRow::default());
        assert_eq!(row_class(&row), "table__row");
        row.warning("Team \"A\" already exists");
        assert_eq!(row_class(&row), "table__row csv-import__row--warning");
        row.error("Team name is required.");
        assert_eq!(row_class(&row), "table__row csv-import__row--error");
    }
}
