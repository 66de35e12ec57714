//! Dashboard page: event feed and map over the same filtered entities.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the landing route. The sidebar filters apply to both views; the
//! map view adds address search, route tools and the Leaflet viewport hosted
//! by `MapHost`, which stays mounted so the controller outlives view switches.

use leptos::prelude::*;

use geomap::controller::ViewMode;

use crate::components::address_search::AddressSearch;
use crate::components::event_feed::EventFeed;
use crate::components::filter_sidebar::FilterSidebar;
use crate::components::map_host::MapHost;
use crate::components::map_toolbar::MapToolbar;
use crate::components::notice_banner::NoticeBanner;
use crate::components::top_bar::TopBar;
use crate::state::dashboard::DashboardUi;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ui = expect_context::<RwSignal<DashboardUi>>();
    let in_map = move || ui.get().view_mode == ViewMode::Map;

    view! {
        <div class="dashboard">
            <TopBar/>
            <div class="dashboard__body">
                <FilterSidebar/>
                <main class="content-area">
                    <NoticeBanner/>
                    <Show when=in_map fallback=|| view! { <EventFeed/> }>
                        <div class="dashboard__map-tools">
                            <AddressSearch/>
                            <MapToolbar/>
                        </div>
                    </Show>
                    <MapHost/>
                </main>
            </div>
        </div>
    }
}
