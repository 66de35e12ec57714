//! Dismissible user notices raised by dashboard actions.

use leptos::prelude::*;

use crate::state::dashboard::DashboardUi;

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ui = expect_context::<RwSignal<DashboardUi>>();

    view! {
        <div class="notice-banner">
            <For each=move || ui.get().notices key=|entry| entry.id let:entry>
                {
                    let id = entry.id;
                    let class = if entry.notice.is_error() {
                        "notice notice--error"
                    } else {
                        "notice notice--ok"
                    };
                    view! {
                        <div class=class role="status">
                            <span class="notice__text">{entry.notice.message()}</span>
                            <button
                                class="notice__close"
                                on:click=move |_| ui.update(|u| u.dismiss(id))
                                title="Cerrar"
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            </For>
        </div>
    }
}
