//! Card list of the entities passing the current filter.

use leptos::prelude::*;

use geomap::entity::Entity;

use crate::state::dashboard::{DashboardUi, Intent, IntentQueue};

#[cfg(test)]
#[path = "event_feed_test.rs"]
mod event_feed_test;

#[component]
pub fn EventFeed() -> impl IntoView {
    let ui = expect_context::<RwSignal<DashboardUi>>();

    view! {
        <div class="feed-container">
            <Show
                when=move || !ui.get().visible.is_empty()
                fallback=move || {
                    view! {
                        <p class="feed-container__empty">
                            {move || if ui.get().loading { "Cargando eventos..." } else { "No hay eventos para mostrar." }}
                        </p>
                    }
                }
            >
                <For each=move || ui.get().visible key=|entity| entity.id.clone() let:entity>
                    <EventCard entity=entity/>
                </For>
            </Show>
        </div>
    }
}

#[component]
fn EventCard(entity: Entity) -> impl IntoView {
    let intents = expect_context::<RwSignal<IntentQueue>>();

    let category = entity.kind();
    let badge_style = format!("background-color: {}", category.color());
    let save_id = entity.id.clone();
    let register_id = entity.id.clone();
    let full = entity.is_full();
    let register_label = register_label(&entity);

    view! {
        <article class="card event-card">
            <div class="event-card__head">
                <h4>{entity.title.clone()}</h4>
                <span class="badge" style=badge_style>{entity.category.clone()}</span>
            </div>
            <p class="event-card__description">{entity.description.clone()}</p>
            <div class="event-card__meta">
                <span>{format!("Organiza: {}", entity.organizer)}</span>
                <span>{format_starts_at(&entity.starts_at)}</span>
                <span>{attendance_label(&entity)}</span>
            </div>
            <div class="event-card__actions">
                <button
                    class="btn"
                    disabled=entity.saved
                    on:click=move |_| intents.update(|q| q.push(Intent::Save(save_id.clone())))
                >
                    {if entity.saved { "Guardado" } else { "Guardar" }}
                </button>
                <button
                    class="btn btn-primary"
                    disabled=entity.registered || full
                    on:click=move |_| intents.update(|q| q.push(Intent::Register(register_id.clone())))
                >
                    {register_label}
                </button>
            </div>
        </article>
    }
}

fn attendance_label(entity: &Entity) -> String {
    format!("{}/{} asistentes", entity.attendees, entity.max_attendees)
}

fn register_label(entity: &Entity) -> &'static str {
    if entity.registered {
        "Inscrito"
    } else if entity.is_full() {
        "Completo"
    } else {
        "Inscribirme"
    }
}

/// `2026-03-01T08:00:00Z` -> `2026-03-01 08:00`. Anything unparseable is
/// shown as given.
fn format_starts_at(raw: &str) -> String {
    raw.split_once('T')
        .and_then(|(date, time)| time.get(..5).map(|hm| format!("{date} {hm}")))
        .unwrap_or_else(|| raw.to_owned())
}
