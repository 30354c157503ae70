//! PageFrame — корневая обёртка страницы dashboard.
//!
//! Ставит на корневой элемент `id` в формате `"{entity}--{category}"`
//! (например `"a001_team--list"`) и `data-page-category`.

use leptos::prelude::*;

/// Список записей
pub const PAGE_CAT_LIST: &str = "list";

/// Use-case страница (импорт и т.п.)
pub const PAGE_CAT_USECASE: &str = "usecase";

#[component]
pub fn PageFrame(
    /// HTML id в формате `{entity}--{category}`
    page_id: &'static str,
    /// `PAGE_CAT_LIST` или `PAGE_CAT_USECASE`
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_USECASE => "page page--usecase",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
