//! Theme selector listing every registered theme.

use leptos::prelude::*;

use geomap::theme::THEMES;

use crate::state::dashboard::{DashboardUi, Intent, IntentQueue};

#[component]
pub fn ThemePicker() -> impl IntoView {
    let ui = expect_context::<RwSignal<DashboardUi>>();
    let intents = expect_context::<RwSignal<IntentQueue>>();

    let on_change = move |ev: leptos::ev::Event| {
        let name = event_target_value(&ev);
        intents.update(|q| q.push(Intent::SelectTheme(name)));
    };

    view! {
        <label class="theme-picker">
            <span class="theme-picker__label">"Tema"</span>
            <select class="theme-picker__select" on:change=on_change prop:value=move || ui.get().theme>
                {THEMES
                    .iter()
                    .map(|theme| view! { <option value=theme.key>{theme.label}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}
