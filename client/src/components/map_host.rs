//! Bridge component between Leptos state and the `geomap` dashboard controller.
//!
//! ARCHITECTURE
//! ============
//! The controller owns map, marker, route, search and theme state; this host
//! owns the browser side. It drains [`Intent`]s written by sibling components,
//! carries out every [`Effect`] the controller hands back, and copies the
//! controller into the [`DashboardUi`] signal after each step.
//!
//! CONCURRENCY
//! ===========
//! Leaflet fires some events synchronously from inside surface calls, while
//! the controller is borrowed. The event sink therefore defers each event to
//! a fresh task and every controller access goes through `try_borrow_mut`.

use leptos::prelude::*;

use geomap::controller::ViewMode;

use crate::state::dashboard::{DashboardUi, IntentQueue};
#[cfg(feature = "hydrate")]
use crate::state::dashboard::Intent;

/// Element id of the Leaflet viewport.
pub const MAP_CONTAINER_ID: &str = "dashboard-map";

#[cfg(feature = "hydrate")]
mod runtime {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use leptos::prelude::*;
    use leptos::task::spawn_local;

    use geomap::config::ServiceConfig;
    use geomap::consts::REGION_PASS_DELAY_MS;
    use geomap::controller::{
        DashboardController, Effect, load_theme, refresh_entities, run_distance, run_register, run_resolve,
        run_reverse, run_route, run_save, run_search,
    };
    use geomap::entity::CategoryFilter;
    use geomap::geocode::GeocodeClient;
    use geomap::lifecycle::{MapHandle, MountTicket};
    use geomap::location::LocationOptions;
    use geomap::surface::MapEvent;
    use geomap::theme_engine::persist_theme;

    use super::{Intent, MAP_CONTAINER_ID};
    use crate::net::api::ApiClient;
    use crate::net::geocode::NominatimGeocoder;
    use crate::net::routing::OsrmRouter;
    use crate::state::dashboard::DashboardUi;
    use crate::util::dom_style::{DocumentStyle, run_region_pass};
    use crate::util::geolocation::current_position;
    use crate::util::leaflet::{EventSink, LeafletSurface};
    use crate::util::ui_persistence;

    const MOUNT_RETRY_MS: u64 = 100;
    const MOUNT_ATTEMPTS: u32 = 50;

    type Controller = DashboardController<LeafletSurface>;

    /// Browser-side owner of the controller and its services.
    #[derive(Clone)]
    pub struct Host {
        dashboard: Rc<RefCell<Controller>>,
        api: Rc<RefCell<ApiClient>>,
        geocoder: Rc<GeocodeClient<NominatimGeocoder>>,
        router: Rc<OsrmRouter>,
        config: Rc<ServiceConfig>,
        ui: RwSignal<DashboardUi>,
    }

    impl Host {
        pub fn new(config: ServiceConfig, ui: RwSignal<DashboardUi>) -> Self {
            let config = config.normalized();
            Self {
                dashboard: Rc::new(RefCell::new(DashboardController::new(&config))),
                api: Rc::new(RefCell::new(ApiClient::from_storage(&config.api_base_url))),
                geocoder: Rc::new(GeocodeClient::new(NominatimGeocoder::new(&config.geocode_base_url), &config)),
                router: Rc::new(OsrmRouter::new(&config.routing_base_url)),
                config: Rc::new(config),
                ui,
            }
        }

        /// Restore local choices, then load theme, user and entities.
        pub fn start(&self) {
            let restored = self.with_dashboard(|d| {
                if let Some(key) = ui_persistence::load_tile_style() {
                    d.restore_tile_style(&key);
                }
                if let Some(at) = ui_persistence::load_location() {
                    d.use_cached_location(at);
                }
            });
            if restored.is_none() {
                log::warn!("dashboard busy at startup");
            }

            let host = self.clone();
            spawn_local(async move {
                let api = host.api();
                let effect = load_theme(&host.dashboard, &api, &mut DocumentStyle).await;
                host.sync();
                host.run(effect.into_iter().collect());
            });

            let host = self.clone();
            spawn_local(async move {
                let api = host.api();
                if api.has_token() {
                    match api.current_user().await {
                        Ok(user) => {
                            let signed_in = api.with_user(&user.id);
                            *host.api.borrow_mut() = signed_in;
                        }
                        Err(e) => log::warn!("current user unavailable: {e}"),
                    }
                }
                host.refresh().await;
            });
        }

        /// Tear the map down with the component.
        pub fn shutdown(&self) {
            if self.with_dashboard(Controller::host_gone).is_none() {
                log::warn!("dashboard busy at shutdown");
            }
        }

        fn api(&self) -> ApiClient {
            self.api.borrow().clone()
        }

        fn with_dashboard<R>(&self, f: impl FnOnce(&mut Controller) -> R) -> Option<R> {
            let Ok(mut dashboard) = self.dashboard.try_borrow_mut() else {
                log::debug!("controller busy; call dropped");
                return None;
            };
            Some(f(&mut dashboard))
        }

        /// Copy controller state and pending notices into the view signal.
        fn sync(&self) {
            let Ok(mut dashboard) = self.dashboard.try_borrow_mut() else {
                return;
            };
            let notices = dashboard.take_notices();
            self.ui.update(|ui| {
                ui.sync_from(&dashboard);
                ui.push_notices(notices);
            });
        }

        async fn refresh(&self) {
            self.ui.update(|ui| ui.loading = true);
            let api = self.api();
            refresh_entities(&self.dashboard, &api).await;
            self.ui.update(|ui| ui.loading = false);
            self.sync();
        }

        pub fn dispatch(&self, intent: Intent) {
            let effects = self.with_dashboard(|d| match intent {
                Intent::SetView(mode) => d.set_view_mode(mode),
                Intent::SetCategory(value) => {
                    d.set_category(CategoryFilter::from_value(&value));
                    Vec::new()
                }
                Intent::SetSearchText(text) => {
                    d.set_search_text(&text);
                    Vec::new()
                }
                Intent::AddressInput(text) => {
                    if let Some(seq) = d.search_input(&text) {
                        let host = self.clone();
                        spawn_local(async move {
                            run_search(&host.dashboard, &host.geocoder, seq, &text).await;
                            host.sync();
                        });
                    }
                    Vec::new()
                }
                Intent::AddressSubmit(text) => {
                    let host = self.clone();
                    spawn_local(async move {
                        run_resolve(&host.dashboard, &host.geocoder, &text).await;
                        host.sync();
                    });
                    Vec::new()
                }
                Intent::PickSuggestion(suggestion) => {
                    d.select_suggestion(&suggestion);
                    Vec::new()
                }
                Intent::ClearSearchPin => {
                    d.clear_search_pin();
                    Vec::new()
                }
                Intent::SelectTheme(name) => d.select_theme(&mut DocumentStyle, &name),
                Intent::SetTileStyle(key) => d.set_tile_style(&key).into_iter().collect(),
                Intent::CenterOnMe => {
                    d.center_on_me();
                    Vec::new()
                }
                Intent::StartDrafting(mode) => {
                    d.start_drafting(mode);
                    Vec::new()
                }
                Intent::StopDrafting => {
                    d.stop_drafting();
                    Vec::new()
                }
                Intent::UndoPick => d.undo_pick(),
                Intent::ClearRoute => {
                    d.clear_route();
                    self.ui.update(|ui| ui.set_route(None));
                    Vec::new()
                }
                Intent::Save(id) => vec![Effect::SaveEntity(id)],
                Intent::Register(id) => vec![Effect::RegisterEntity(id)],
                Intent::Refresh => {
                    let host = self.clone();
                    spawn_local(async move { host.refresh().await });
                    Vec::new()
                }
            });
            self.sync();
            self.run(effects.unwrap_or_default());
        }

        fn map_event(&self, handle: MapHandle, event: MapEvent) {
            let effects = self.with_dashboard(|d| d.handle_map_event(handle, event)).unwrap_or_default();
            self.sync();
            self.run(effects);
        }

        fn run(&self, effects: Vec<Effect>) {
            for effect in effects {
                self.run_one(effect);
            }
        }

        fn run_one(&self, effect: Effect) {
            let host = self.clone();
            match effect {
                Effect::MountMap(ticket) => self.mount(ticket),
                Effect::ResolveLocation => {
                    let options = LocationOptions::from_config(&self.config);
                    spawn_local(async move {
                        let outcome = current_position(options).await;
                        let effects = host.with_dashboard(|d| d.location_resolved(outcome)).unwrap_or_default();
                        host.sync();
                        host.run(effects);
                    });
                }
                Effect::ReverseGeocode(at) => spawn_local(async move {
                    run_reverse(&host.dashboard, &host.geocoder, at).await;
                    host.sync();
                }),
                Effect::Route(request) => spawn_local(async move {
                    let summary = run_route(&host.dashboard, &*host.router, request).await;
                    host.ui.update(|ui| ui.set_route(summary.as_ref()));
                    host.sync();
                }),
                Effect::FetchDistance { entity_id, waypoints } => spawn_local(async move {
                    run_distance(&host.dashboard, &*host.router, &entity_id, &waypoints).await;
                }),
                Effect::SaveEntity(id) => spawn_local(async move {
                    let api = host.api();
                    run_save(&host.dashboard, &api, &id).await;
                    host.sync();
                }),
                Effect::RegisterEntity(id) => spawn_local(async move {
                    let api = host.api();
                    run_register(&host.dashboard, &api, &id).await;
                    host.sync();
                }),
                Effect::PersistTheme(name) => spawn_local(async move {
                    let api = host.api();
                    persist_theme(&api, name).await;
                }),
                Effect::ScheduleRegionPass(plan) => spawn_local(async move {
                    gloo_timers::future::sleep(Duration::from_millis(u64::from(REGION_PASS_DELAY_MS))).await;
                    let due = host.dashboard.try_borrow().is_ok_and(|d| d.region_pass_due(&plan));
                    if due {
                        let written = run_region_pass(&plan);
                        log::debug!("region pass for {} touched {written} elements", plan.theme);
                    }
                }),
                Effect::StoreTileStyle(key) => ui_persistence::save_tile_style(key),
                Effect::StoreLocation(at) => ui_persistence::save_location(at),
            }
        }

        /// Create the Leaflet surface once both the script and the viewport
        /// element exist, then hand it to the controller.
        fn mount(&self, ticket: MountTicket) {
            let host = self.clone();
            spawn_local(async move {
                let handle_cell = Rc::new(Cell::new(None::<MapHandle>));
                let sink: EventSink = {
                    let host = host.clone();
                    let handle_cell = Rc::clone(&handle_cell);
                    Rc::new(move |event: MapEvent| {
                        let Some(handle) = handle_cell.get() else {
                            return;
                        };
                        let host = host.clone();
                        spawn_local(async move { host.map_event(handle, event) });
                    })
                };
                let center = host
                    .dashboard
                    .try_borrow()
                    .ok()
                    .and_then(|d| d.own_location())
                    .map_or(host.config.default_center, |fix| fix.position);

                for _ in 0..MOUNT_ATTEMPTS {
                    if host.dashboard.try_borrow().is_ok_and(|d| !d.awaits_mount(ticket)) {
                        log::debug!("map reservation gone before mount");
                        return;
                    }
                    if let Some(surface) =
                        LeafletSurface::create(MAP_CONTAINER_ID, center, host.config.default_zoom, Rc::clone(&sink))
                    {
                        match host.with_dashboard(|d| d.attach_map(ticket, surface)) {
                            Some(Ok(handle)) => handle_cell.set(Some(handle)),
                            Some(Err(e)) => log::debug!("map attach refused: {e}"),
                            None => log::warn!("controller busy during map attach"),
                        }
                        host.sync();
                        return;
                    }
                    gloo_timers::future::sleep(Duration::from_millis(MOUNT_RETRY_MS)).await;
                }
                log::warn!("map viewport never became ready");
                if host.with_dashboard(Controller::host_gone).is_some() {
                    host.sync();
                }
            });
        }
    }
}

/// Map viewport plus the controller that drives it. Renders the Leaflet
/// container only while the dashboard is in map view.
#[component]
pub fn MapHost() -> impl IntoView {
    let ui = expect_context::<RwSignal<DashboardUi>>();
    let intents = expect_context::<RwSignal<IntentQueue>>();

    #[cfg(feature = "hydrate")]
    {
        let host = runtime::Host::new(geomap::config::ServiceConfig::default(), ui);
        host.start();

        let drain = host.clone();
        Effect::new(move || {
            if intents.with(IntentQueue::is_empty) {
                return;
            }
            let batch: Vec<Intent> = intents.try_update(IntentQueue::drain).unwrap_or_default();
            for intent in batch {
                drain.dispatch(intent);
            }
        });

        let stored = StoredValue::new_local(host);
        on_cleanup(move || {
            if stored.try_with_value(runtime::Host::shutdown).is_none() {
                log::debug!("map host already disposed");
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = intents;
    }

    view! {
        <Show when=move || ui.get().view_mode == ViewMode::Map>
            <div id=MAP_CONTAINER_ID class="dashboard-map"></div>
        </Show>
    }
}
