//! Map-view controls: tile style, route drafting, center-on-me and the
//! status line for the drawn route and own place.

use leptos::prelude::*;

use geomap::routing::DraftMode;
use geomap::tiles::TILE_STYLES;

use crate::state::dashboard::{DashboardUi, Intent, IntentQueue};

#[cfg(test)]
#[path = "map_toolbar_test.rs"]
mod map_toolbar_test;

#[component]
pub fn MapToolbar() -> impl IntoView {
    let ui = expect_context::<RwSignal<DashboardUi>>();
    let intents = expect_context::<RwSignal<IntentQueue>>();
    let push = move |intent: Intent| intents.update(|q| q.push(intent));

    let on_tile = move |ev: leptos::ev::Event| push(Intent::SetTileStyle(event_target_value(&ev)));

    view! {
        <div class="map-toolbar">
            <label class="map-toolbar__field">
                <span>"Mapa"</span>
                <select on:change=on_tile prop:value=move || ui.get().tile_style>
                    {TILE_STYLES
                        .iter()
                        .map(|style| view! { <option value=style.key>{style.name}</option> })
                        .collect_view()}
                </select>
            </label>

            <button class="btn" on:click=move |_| push(Intent::CenterOnMe) title="Centrar en mi ubicación">
                "Mi ubicación"
            </button>

            <Show
                when=move || ui.get().drafting
                fallback=move || {
                    view! {
                        <button class="btn" on:click=move |_| push(Intent::StartDrafting(DraftMode::Simple))>
                            "Ruta A-B"
                        </button>
                        <button class="btn" on:click=move |_| push(Intent::StartDrafting(DraftMode::Multiple))>
                            "Ruta con paradas"
                        </button>
                    }
                }
            >
                <span class="map-toolbar__draft">
                    {move || draft_status(ui.get().draft_mode, ui.get().draft_points)}
                </span>
                <button
                    class="btn"
                    on:click=move |_| push(Intent::UndoPick)
                    disabled=move || ui.get().draft_points == 0
                >
                    "Deshacer"
                </button>
                <button class="btn" on:click=move |_| push(Intent::StopDrafting)>
                    "Terminar"
                </button>
            </Show>

            <button
                class="btn"
                on:click=move |_| push(Intent::ClearRoute)
                disabled=move || ui.get().route_note.is_none() && !ui.get().route_pending
            >
                "Borrar ruta"
            </button>

            <span class="map-toolbar__spacer"></span>
            <span class="map-toolbar__status">
                {move || status_line(&ui.get())}
            </span>
        </div>
    }
}

fn draft_status(mode: DraftMode, points: usize) -> String {
    match mode {
        DraftMode::Simple if points == 0 => "Toca el punto de partida".to_owned(),
        DraftMode::Simple if points == 1 => "Toca el destino".to_owned(),
        DraftMode::Simple => "Ruta trazada; toca para empezar otra".to_owned(),
        DraftMode::Multiple if points < 2 => format!("{points} puntos; toca para añadir"),
        DraftMode::Multiple => format!("{points} puntos en la ruta"),
    }
}

/// Route progress first, then the own place, else nothing.
fn status_line(ui: &DashboardUi) -> String {
    if ui.route_pending {
        return "Calculando ruta...".to_owned();
    }
    if let Some(note) = &ui.route_note {
        return note.clone();
    }
    match (&ui.place_label, ui.own_location_known) {
        (Some(place), _) => format!("Estás en {place}"),
        (None, true) => "Ubicación detectada".to_owned(),
        (None, false) => String::new(),
    }
}
