//! [`MapSurface`] over Leaflet.
//!
//! Leaflet is loaded from a `<script>` tag in the page shell and reached
//! through a small inline JS module. Layers and listeners live on the Rust
//! side in id-keyed maps so the engine can remove exactly what it added.
//!
//! EVENTS
//! ======
//! Native events are converted to [`MapEvent`]s and handed to the sink given
//! at construction. Leaflet fires some events (`zoomend`, `popupopen`) while
//! the engine is still inside a surface call, so the sink must not call back
//! into the engine synchronously.

use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use geomap::geo::{Bounds, Coordinate};
use geomap::surface::{
    EventTarget, LayerId, ListenerId, MapEvent, MapEventKind, MapSurface, MarkerSpec, PolylineStyle, PopupAction,
};
use geomap::tiles::TileStyle;

use super::marker_html::{ACTION_ATTR, icon_html, popup_html};

#[wasm_bindgen(inline_js = r#"
export function gpLeafletReady() {
  return !!(window.L && window.L.map);
}

export function gpCreateMap(containerId, lat, lng, zoom) {
  const el = document.getElementById(containerId);
  if (!el || !window.L) {
    return null;
  }
  return window.L.map(el, { zoomControl: true }).setView([lat, lng], zoom);
}

export function gpAddTileLayer(map, url, attribution, subdomains, maxZoom) {
  const options = { attribution, maxZoom };
  if (subdomains) {
    options.subdomains = subdomains;
  }
  return window.L.tileLayer(url, options).addTo(map);
}

function gpIcon(html, className, size) {
  return window.L.divIcon({ html, className, iconSize: [size, size], iconAnchor: [size / 2, size / 2] });
}

export function gpAddMarker(map, lat, lng, html, className, size, popupHtml) {
  const marker = window.L.marker([lat, lng], { icon: gpIcon(html, className, size) }).addTo(map);
  if (popupHtml) {
    marker.bindPopup(popupHtml);
  }
  return marker;
}

export function gpUpdateMarker(marker, lat, lng, html, className, size, popupHtml) {
  marker.setLatLng([lat, lng]);
  marker.setIcon(gpIcon(html, className, size));
  if (!popupHtml) {
    marker.unbindPopup();
  } else if (marker.getPopup()) {
    marker.setPopupContent(popupHtml);
  } else {
    marker.bindPopup(popupHtml);
  }
}

export function gpAddPolyline(map, flat, color, weight, opacity, dash) {
  const points = [];
  for (let i = 0; i + 1 < flat.length; i += 2) {
    points.push([flat[i], flat[i + 1]]);
  }
  return window.L.polyline(points, { color, weight, opacity, dashArray: dash || null }).addTo(map);
}

export function gpRemoveLayer(map, layer) {
  map.removeLayer(layer);
}

export function gpSetView(map, lat, lng, zoom) {
  map.setView([lat, lng], zoom);
}

export function gpFitBounds(map, south, west, north, east, padding) {
  map.fitBounds([[south, west], [north, east]], { padding: [padding, padding] });
}

export function gpZoom(map) {
  return map.getZoom();
}

export function gpOn(target, name, callback) {
  const handler = (ev) => {
    if (name === 'click' && ev.latlng) {
      callback(ev.latlng.lat, ev.latlng.lng, '');
    } else if (name === 'zoomend') {
      callback(target.getZoom(), 0, '');
    } else {
      callback(0, 0, '');
    }
  };
  target.on(name, handler);
  return () => target.off(name, handler);
}

export function gpOnPopupAction(marker, attr, callback) {
  let root = null;
  const onClick = (ev) => {
    const button = ev.target && ev.target.closest ? ev.target.closest('[' + attr + ']') : null;
    if (button) {
      callback(0, 0, button.getAttribute(attr) || '');
    }
  };
  const onOpen = (ev) => {
    const el = ev.popup && ev.popup.getElement ? ev.popup.getElement() : null;
    if (!el || el === root) {
      return;
    }
    if (root) {
      root.removeEventListener('click', onClick);
    }
    root = el;
    root.addEventListener('click', onClick);
  };
  marker.on('popupopen', onOpen);
  return () => {
    marker.off('popupopen', onOpen);
    if (root) {
      root.removeEventListener('click', onClick);
    }
  };
}

export function gpOff(off) {
  if (typeof off === 'function') {
    off();
  }
}

export function gpDestroy(map) {
  map.off();
  map.remove();
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = gpLeafletReady)]
    fn js_leaflet_ready() -> bool;
    #[wasm_bindgen(catch, js_name = gpCreateMap)]
    fn js_create_map(container_id: &str, lat: f64, lng: f64, zoom: f64) -> Result<JsValue, JsValue>;
    #[wasm_bindgen(js_name = gpAddTileLayer)]
    fn js_add_tile_layer(map: &JsValue, url: &str, attribution: &str, subdomains: &str, max_zoom: u8) -> JsValue;
    #[wasm_bindgen(js_name = gpAddMarker)]
    fn js_add_marker(map: &JsValue, lat: f64, lng: f64, html: &str, class_name: &str, size: u32, popup: &str) -> JsValue;
    #[wasm_bindgen(js_name = gpUpdateMarker)]
    fn js_update_marker(marker: &JsValue, lat: f64, lng: f64, html: &str, class_name: &str, size: u32, popup: &str);
    #[wasm_bindgen(js_name = gpAddPolyline)]
    fn js_add_polyline(map: &JsValue, flat: Vec<f64>, color: &str, weight: u32, opacity: f64, dash: &str) -> JsValue;
    #[wasm_bindgen(js_name = gpRemoveLayer)]
    fn js_remove_layer(map: &JsValue, layer: &JsValue);
    #[wasm_bindgen(js_name = gpSetView)]
    fn js_set_view(map: &JsValue, lat: f64, lng: f64, zoom: f64);
    #[wasm_bindgen(js_name = gpFitBounds)]
    fn js_fit_bounds(map: &JsValue, south: f64, west: f64, north: f64, east: f64, padding: u32);
    #[wasm_bindgen(js_name = gpZoom)]
    fn js_zoom(map: &JsValue) -> f64;
    #[wasm_bindgen(js_name = gpOn)]
    fn js_on(target: &JsValue, name: &str, callback: &Closure<dyn FnMut(f64, f64, String)>) -> JsValue;
    #[wasm_bindgen(js_name = gpOnPopupAction)]
    fn js_on_popup_action(marker: &JsValue, attr: &str, callback: &Closure<dyn FnMut(f64, f64, String)>) -> JsValue;
    #[wasm_bindgen(js_name = gpOff)]
    fn js_off(handle: &JsValue);
    #[wasm_bindgen(js_name = gpDestroy)]
    fn js_destroy(map: &JsValue);
}

/// Whether the Leaflet script has finished loading.
pub fn is_ready() -> bool {
    js_leaflet_ready()
}

/// Receives converted map events.
pub type EventSink = Rc<dyn Fn(MapEvent)>;

struct Listener {
    off: JsValue,
    _callback: Closure<dyn FnMut(f64, f64, String)>,
}

pub struct LeafletSurface {
    map: JsValue,
    layers: HashMap<LayerId, JsValue>,
    listeners: HashMap<ListenerId, Listener>,
    next_id: u64,
    sink: EventSink,
}

impl LeafletSurface {
    /// Create a Leaflet map inside the element with id `container_id`.
    /// Returns `None` while Leaflet or the container is missing.
    pub fn create(container_id: &str, center: Coordinate, zoom: f64, sink: EventSink) -> Option<Self> {
        if !js_leaflet_ready() {
            return None;
        }
        let map = match js_create_map(container_id, center.lat, center.lng, zoom) {
            Ok(map) => map,
            Err(e) => {
                log::warn!("leaflet refused the map container: {e:?}");
                return None;
            }
        };
        if map.is_null() || map.is_undefined() {
            return None;
        }
        Some(Self { map, layers: HashMap::new(), listeners: HashMap::new(), next_id: 0, sink })
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn insert_layer(&mut self, layer: JsValue) -> LayerId {
        let id = LayerId(self.next());
        self.layers.insert(id, layer);
        id
    }

    fn callback(&self, target: EventTarget, kind: MapEventKind) -> Closure<dyn FnMut(f64, f64, String)> {
        let sink = Rc::clone(&self.sink);
        Closure::new(move |a: f64, b: f64, token: String| {
            let event = match (kind, target) {
                (MapEventKind::ZoomEnd, _) => Some(MapEvent::ZoomEnd { zoom: a }),
                (MapEventKind::Click, _) => Some(MapEvent::Click { at: Coordinate::new(a, b) }),
                (MapEventKind::PopupOpen, EventTarget::Layer(layer)) => Some(MapEvent::PopupOpen { layer }),
                (MapEventKind::PopupAction, EventTarget::Layer(layer)) => {
                    PopupAction::from_token(&token).map(|action| MapEvent::PopupAction { layer, action })
                }
                _ => None,
            };
            if let Some(event) = event {
                sink(event);
            }
        })
    }
}

fn event_name(kind: MapEventKind) -> &'static str {
    match kind {
        MapEventKind::ZoomEnd => "zoomend",
        MapEventKind::Click => "click",
        MapEventKind::PopupOpen | MapEventKind::PopupAction => "popupopen",
    }
}

impl MapSurface for LeafletSurface {
    fn add_tile_layer(&mut self, style: &TileStyle) -> LayerId {
        let layer = js_add_tile_layer(&self.map, style.url_template, style.attribution, style.subdomains, style.max_zoom);
        self.insert_layer(layer)
    }

    fn add_marker(&mut self, spec: &MarkerSpec) -> LayerId {
        let icon = icon_html(&spec.icon);
        let popup = popup_html(&spec.popup).unwrap_or_default();
        let layer = js_add_marker(
            &self.map,
            spec.position.lat,
            spec.position.lng,
            &icon.html,
            icon.class_name,
            icon.size_px,
            &popup,
        );
        self.insert_layer(layer)
    }

    fn update_marker(&mut self, layer: LayerId, spec: &MarkerSpec) {
        let Some(marker) = self.layers.get(&layer) else {
            log::warn!("update of unknown marker {layer:?}");
            return;
        };
        let icon = icon_html(&spec.icon);
        let popup = popup_html(&spec.popup).unwrap_or_default();
        js_update_marker(marker, spec.position.lat, spec.position.lng, &icon.html, icon.class_name, icon.size_px, &popup);
    }

    fn add_polyline(&mut self, points: &[Coordinate], style: &PolylineStyle) -> LayerId {
        let flat: Vec<f64> = points.iter().flat_map(|c| [c.lat, c.lng]).collect();
        let layer = js_add_polyline(&self.map, flat, style.color, style.weight, style.opacity, style.dash.unwrap_or(""));
        self.insert_layer(layer)
    }

    fn remove_layer(&mut self, layer: LayerId) {
        if let Some(js) = self.layers.remove(&layer) {
            js_remove_layer(&self.map, &js);
        }
    }

    fn set_view(&mut self, center: Coordinate, zoom: f64) {
        js_set_view(&self.map, center.lat, center.lng, zoom);
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding_px: u32) {
        js_fit_bounds(
            &self.map,
            bounds.south_west.lat,
            bounds.south_west.lng,
            bounds.north_east.lat,
            bounds.north_east.lng,
            padding_px,
        );
    }

    fn zoom(&self) -> f64 {
        js_zoom(&self.map)
    }

    fn listen(&mut self, target: EventTarget, kind: MapEventKind) -> ListenerId {
        let id = ListenerId(self.next());
        let js_target = match target {
            EventTarget::Map => Some(self.map.clone()),
            EventTarget::Layer(layer) => self.layers.get(&layer).cloned(),
        };
        let Some(js_target) = js_target else {
            log::warn!("listener for missing target {target:?}");
            return id;
        };
        let callback = self.callback(target, kind);
        let off = match kind {
            MapEventKind::PopupAction => js_on_popup_action(&js_target, ACTION_ATTR, &callback),
            _ => js_on(&js_target, event_name(kind), &callback),
        };
        self.listeners.insert(id, Listener { off, _callback: callback });
        id
    }

    fn unlisten(&mut self, listener: ListenerId) {
        if let Some(entry) = self.listeners.remove(&listener) {
            js_off(&entry.off);
        }
    }

    fn destroy(&mut self) {
        for (_, entry) in self.listeners.drain() {
            js_off(&entry.off);
        }
        self.layers.clear();
        js_destroy(&self.map);
    }
}
