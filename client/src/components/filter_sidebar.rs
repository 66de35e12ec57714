//! Feed filters: category and free-text search.
//!
//! SYSTEM CONTEXT
//! ==============
//! Filter changes go to the controller, which narrows both the feed and the
//! map markers from the same predicate.

use leptos::prelude::*;

use geomap::entity::Category;

use crate::state::dashboard::{DashboardUi, Intent, IntentQueue};

#[cfg(test)]
#[path = "filter_sidebar_test.rs"]
mod filter_sidebar_test;

#[component]
pub fn FilterSidebar() -> impl IntoView {
    let ui = expect_context::<RwSignal<DashboardUi>>();
    let intents = expect_context::<RwSignal<IntentQueue>>();

    let on_category = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        intents.update(|q| q.push(Intent::SetCategory(value)));
    };
    let on_search = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        intents.update(|q| q.push(Intent::SetSearchText(text)));
    };
    let on_refresh = move |_| intents.update(|q| q.push(Intent::Refresh));

    view! {
        <aside class="filter-sidebar">
            <h3 class="filter-sidebar__title">"Filtros"</h3>
            <label class="filter-sidebar__field">
                <span>"Categoría"</span>
                <select on:change=on_category prop:value=move || ui.get().category>
                    <option value="all">"Todas"</option>
                    {Category::ALL
                        .iter()
                        .map(|c| view! { <option value=c.tag()>{c.tag()}</option> })
                        .collect_view()}
                </select>
            </label>
            <label class="filter-sidebar__field">
                <span>"Buscar"</span>
                <input
                    type="search"
                    placeholder="Título, organizador..."
                    prop:value=move || ui.get().search_text
                    on:input=on_search
                />
            </label>
            <p class="filter-sidebar__count">{move || count_label(ui.get().visible.len(), ui.get().total)}</p>
            <button class="btn btn-primary" on:click=on_refresh disabled=move || ui.get().loading>
                {move || if ui.get().loading { "Cargando..." } else { "Actualizar" }}
            </button>
        </aside>
    }
}

fn count_label(visible: usize, total: usize) -> String {
    if visible == total {
        format!("{total} eventos")
    } else {
        format!("{visible} de {total} eventos")
    }
}
