//! Address box with debounced suggestions.
//!
//! Keystrokes are held for a short quiet period before they reach the
//! controller; only the last one of a burst is sent. Enter resolves the typed
//! text directly.

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use geomap::consts::SEARCH_DEBOUNCE_MS;
use geomap::geocode::SuggestionState;

use crate::state::dashboard::{DashboardUi, Intent, IntentQueue};

#[cfg(test)]
#[path = "address_search_test.rs"]
mod address_search_test;

#[component]
pub fn AddressSearch() -> impl IntoView {
    let ui = expect_context::<RwSignal<DashboardUi>>();
    let intents = expect_context::<RwSignal<IntentQueue>>();
    let text = RwSignal::new(String::new());
    let keystroke = RwSignal::new(0_u64);

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        text.set(value.clone());
        keystroke.update(|k| *k += 1);
        let seq = keystroke.get_untracked();
        #[cfg(feature = "hydrate")]
        {
            gloo_timers::callback::Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                if keystroke.get_untracked() == seq {
                    intents.update(|q| q.push(Intent::AddressInput(value)));
                }
            })
            .forget();
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = seq;
            intents.update(|q| q.push(Intent::AddressInput(value)));
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            keystroke.update(|k| *k += 1);
            intents.update(|q| q.push(Intent::AddressSubmit(text.get_untracked())));
        }
    };

    let on_clear = move |_| {
        text.set(String::new());
        keystroke.update(|k| *k += 1);
        intents.update(|q| {
            q.push(Intent::AddressInput(String::new()));
            q.push(Intent::ClearSearchPin);
        });
    };

    let ready = move || match ui.get().suggestions {
        SuggestionState::Ready(list) => list,
        _ => Vec::new(),
    };

    view! {
        <div class="address-search dropdown-content-container">
            <input
                class="address-search__input"
                type="text"
                placeholder="Buscar dirección..."
                prop:value=move || text.get()
                on:input=on_input
                on:keydown=on_keydown
            />
            <button class="btn address-search__clear" on:click=on_clear title="Limpiar búsqueda">
                "×"
            </button>
            <Show when=move || is_open(&ui.get().suggestions)>
                <ul class="dropdown-content">
                    {move || {
                        status_line(&ui.get().suggestions)
                            .map(|line| view! { <li class="dropdown-content__status"><small>{line}</small></li> })
                    }}
                    <For each=ready key=|s| s.label.clone() let:suggestion>
                        {
                            let label = suggestion.label.clone();
                            let coords = format!("{:.4}, {:.4}", suggestion.position.lat, suggestion.position.lng);
                            view! {
                                <li
                                    class="dropdown-content__item"
                                    on:click=move |_| {
                                        text.set(suggestion.label.clone());
                                        intents.update(|q| q.push(Intent::PickSuggestion(suggestion.clone())));
                                    }
                                >
                                    <span>{label}</span>
                                    <small class="text-muted">{coords}</small>
                                </li>
                            }
                        }
                    </For>
                </ul>
            </Show>
        </div>
    }
}

fn is_open(state: &SuggestionState) -> bool {
    !matches!(state, SuggestionState::Idle)
}

/// Text shown above (or instead of) the suggestion rows.
fn status_line(state: &SuggestionState) -> Option<&'static str> {
    match state {
        SuggestionState::Searching => Some("Buscando..."),
        SuggestionState::NoResults => Some("Sin resultados."),
        SuggestionState::Failed => Some(geomap::geocode::FAILED_MESSAGE),
        SuggestionState::Idle | SuggestionState::Ready(_) => None,
    }
}
