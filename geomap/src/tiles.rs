//! Named base-map tile styles.

#[cfg(test)]
#[path = "tiles_test.rs"]
mod tiles_test;

/// One selectable base-map imagery source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileStyle {
    /// Stable key persisted in local storage.
    pub key: &'static str,
    /// Label shown in the style picker.
    pub name: &'static str,
    /// `{s}`/`{z}`/`{x}`/`{y}` URL template.
    pub url_template: &'static str,
    pub attribution: &'static str,
    /// Subdomain letters substituted for `{s}`; empty when unused.
    pub subdomains: &'static str,
    pub max_zoom: u8,
}

pub const DEFAULT_TILE_STYLE: &str = "openstreetmap";

pub static TILE_STYLES: [TileStyle; 3] = [
    TileStyle {
        key: DEFAULT_TILE_STYLE,
        name: "OpenStreetMap",
        url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: "© OpenStreetMap contributors",
        subdomains: "abc",
        max_zoom: 19,
    },
    TileStyle {
        key: "satellite",
        name: "Vista Satelital",
        url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        attribution: "© Esri",
        subdomains: "",
        max_zoom: 19,
    },
    TileStyle {
        key: "hybrid_esri",
        name: "Satélite con Calles (Esri)",
        url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        attribution: "© Esri",
        subdomains: "",
        max_zoom: 19,
    },
];

/// Look up a style by key.
#[must_use]
pub fn tile_style(key: &str) -> Option<&'static TileStyle> {
    TILE_STYLES.iter().find(|style| style.key == key)
}

#[must_use]
pub fn default_tile_style() -> &'static TileStyle {
    &TILE_STYLES[0]
}

/// Look up a style by key, falling back to the default for unknown keys.
#[must_use]
pub fn tile_style_or_default(key: &str) -> &'static TileStyle {
    tile_style(key).unwrap_or_else(default_tile_style)
}

impl TileStyle {
    /// Expand the URL template for one tile, picking a subdomain by `(x + y)`.
    #[must_use]
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        let mut url = self
            .url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string());
        let subdomains: Vec<char> = self.subdomains.chars().collect();
        if !subdomains.is_empty() {
            let index = (x as usize + y as usize) % subdomains.len();
            url = url.replace("{s}", &subdomains[index].to_string());
        }
        url
    }
}
