//! Dashboard header: brand, list/map switch and theme picker.

use leptos::prelude::*;

use geomap::controller::ViewMode;

use crate::components::theme_picker::ThemePicker;
use crate::state::dashboard::{DashboardUi, Intent, IntentQueue};

#[component]
pub fn TopBar() -> impl IntoView {
    let ui = expect_context::<RwSignal<DashboardUi>>();
    let intents = expect_context::<RwSignal<IntentQueue>>();

    let switch_to = move |mode: ViewMode| intents.update(|q| q.push(Intent::SetView(mode)));
    let view_class = move |mode: ViewMode| {
        if ui.get().view_mode == mode { "btn top-bar__view top-bar__view--active" } else { "btn top-bar__view" }
    };

    view! {
        <header class="top-bar">
            <strong class="top-bar__brand">"GeoPlanner"</strong>
            <span class="top-bar__spacer"></span>
            <div class="top-bar__views">
                <button
                    class=move || view_class(ViewMode::List)
                    on:click=move |_| switch_to(ViewMode::List)
                    title="Ver lista de eventos"
                >
                    "Lista"
                </button>
                <button
                    class=move || view_class(ViewMode::Map)
                    on:click=move |_| switch_to(ViewMode::Map)
                    title="Ver mapa"
                >
                    "Mapa"
                </button>
            </div>
            <ThemePicker/>
        </header>
    }
}
