/// Zoom level used when a map instance is first mounted.
pub const DEFAULT_ZOOM: f64 = 12.0;

/// Zoom level used when centering on an address search result.
pub const SEARCH_RESULT_ZOOM: f64 = 16.0;

/// Fallback map center latitude (Maracaibo).
pub const DEFAULT_CENTER_LAT: f64 = 10.654;

/// Fallback map center longitude (Maracaibo).
pub const DEFAULT_CENTER_LNG: f64 = -71.612;

/// Own-location icon size bounds in CSS pixels.
pub const OWN_ICON_MIN_PX: f64 = 20.0;
pub const OWN_ICON_MAX_PX: f64 = 50.0;

/// Own-location icon pixels per zoom level before clamping.
pub const OWN_ICON_PX_PER_ZOOM: f64 = 3.0;

/// Entity marker icon size in CSS pixels.
pub const ENTITY_ICON_PX: u32 = 30;

/// Address search result pin size in CSS pixels.
pub const SEARCH_PIN_PX: u32 = 32;

/// Padding applied when fitting the map to a route.
pub const ROUTE_FIT_PADDING_PX: u32 = 50;

/// Upper bound on waiting for a geolocation fix.
pub const LOCATION_TIMEOUT_MS: u32 = 8_000;

/// Maximum age of a cached browser geolocation fix.
pub const LOCATION_MAX_AGE_MS: u32 = 300_000;

/// Delay between writing style variables and the region restyle pass.
pub const REGION_PASS_DELAY_MS: u32 = 100;

/// Share of white mixed into the theme accent for dropdown panels.
pub const DROPDOWN_WHITE_RATIO: f64 = 0.9;

/// Shortest trimmed query (in characters) sent to the geocoder.
pub const MIN_QUERY_CHARS: usize = 3;

/// Quiet period before a typed query is sent to the geocoder.
pub const SEARCH_DEBOUNCE_MS: u32 = 250;

/// Maximum suggestions requested per query.
pub const SUGGESTION_LIMIT: u32 = 5;

/// Attendance cap shown when the post carries none.
pub const DEFAULT_MAX_ATTENDEES: u32 = 10;

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
