//! Static registry of named color themes.

use crate::color::{FALLBACK_ACCENT, first_hex, mix_with_white, parse_hex_rgb};
use crate::consts::DROPDOWN_WHITE_RATIO;

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

pub const DEFAULT_THEME: &str = "default";

/// Key of the only dark theme.
pub const NIGHT_THEME: &str = "noche";

/// Warm off-white used for free text on the night theme.
pub const NIGHT_TEXT: &str = "#f5f5dc";

/// Color and shadow override for the brand title in the top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandStyle {
    pub color: &'static str,
    /// `None` derives a faint shadow from `color`.
    pub shadow: Option<&'static str>,
}

/// A named, immutable bundle of color tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub key: &'static str,
    pub label: &'static str,
    pub header_bg: &'static str,
    pub header_text: &'static str,
    pub body_bg: &'static str,
    pub sidebar_bg: &'static str,
    pub sidebar_text: &'static str,
    pub card_bg: &'static str,
    pub card_text: &'static str,
    pub btn_primary_bg: &'static str,
    pub brand: BrandStyle,
    /// Header gets the animated gradient class.
    pub animated_header: bool,
}

impl Theme {
    #[must_use]
    pub fn is_night(&self) -> bool {
        self.key == NIGHT_THEME
    }

    /// Value for the root day/night attribute.
    #[must_use]
    pub fn day_night(&self) -> &'static str {
        if self.is_night() { "night" } else { "light" }
    }

    /// First hex stop of the header gradient.
    #[must_use]
    pub fn accent(&self) -> &'static str {
        first_hex(self.header_bg).unwrap_or(FALLBACK_ACCENT)
    }

    /// Dropdown panel background: the accent blended toward white.
    #[must_use]
    pub fn dropdown_bg(&self) -> String {
        mix_with_white(self.accent(), DROPDOWN_WHITE_RATIO)
    }

    /// Text shadow for the brand title.
    #[must_use]
    pub fn brand_shadow(&self) -> String {
        if let Some(shadow) = self.brand.shadow {
            return shadow.to_owned();
        }
        let (r, g, b) = parse_hex_rgb(self.brand.color).unwrap_or((30, 64, 175));
        format!("1px 1px 2px rgba({r}, {g}, {b}, 0.3)")
    }

    #[must_use]
    pub fn card_border(&self) -> &'static str {
        if self.is_night() { "#374151" } else { "#e5e7eb" }
    }

    #[must_use]
    pub fn btn_primary_hover(&self) -> &'static str {
        if self.is_night() { "#1e40af" } else { "#0056b3" }
    }
}

#[allow(clippy::too_many_arguments)]
const fn gradient_theme(
    key: &'static str,
    label: &'static str,
    header_bg: &'static str,
    text: &'static str,
    body_bg: &'static str,
    card_text: &'static str,
    accent: &'static str,
    brand: &'static str,
) -> Theme {
    Theme {
        key,
        label,
        header_bg,
        header_text: text,
        body_bg,
        sidebar_bg: header_bg,
        sidebar_text: text,
        card_bg: "#ffffff",
        card_text,
        btn_primary_bg: accent,
        brand: BrandStyle { color: brand, shadow: None },
        animated_header: false,
    }
}

pub static THEMES: [Theme; 9] = [
    gradient_theme(
        DEFAULT_THEME,
        "Predeterminado",
        "linear-gradient(145deg, #007BFF, #003366)",
        "white",
        "#f0f2f5",
        "#333",
        "#00bfff",
        "#1e40af",
    ),
    Theme {
        animated_header: true,
        ..gradient_theme(
            "aurora",
            "Aurora",
            "linear-gradient(145deg, #F8CDDA, #E8B4D9, #D19BB8, #B76E99, #8B5A9B, #6B4E8B, #1D2B64)",
            "#FFFFFF",
            "#fdeff2",
            "#1D2B64",
            "#1D2B64",
            "#1d2b64",
        )
    },
    Theme {
        card_bg: "#1e293b",
        brand: BrandStyle { color: NIGHT_TEXT, shadow: Some("2px 2px 4px rgba(0, 0, 0, 0.5)") },
        ..gradient_theme(
            NIGHT_THEME,
            "Noche",
            "linear-gradient(145deg, #0f172a, #1e293b, #334155, #475569, #64748b)",
            "white",
            "#0f172a",
            "#e2e8f0",
            "#38bdf8",
            NIGHT_TEXT,
        )
    },
    gradient_theme(
        "oceano",
        "Océano",
        "linear-gradient(145deg, #2C3E50, #4CA1AF)",
        "white",
        "#eef6f7",
        "#2C3E50",
        "#4CA1AF",
        "#2C3E50",
    ),
    gradient_theme(
        "amanecer",
        "Amanecer",
        "linear-gradient(145deg, #FF512F, #F09819)",
        "white",
        "#fff8f2",
        "#5c2a07",
        "#FF512F",
        "#FF512F",
    ),
    gradient_theme(
        "pastel",
        "Pastel",
        "linear-gradient(145deg, #A1C4FD, #C2E9FB)",
        "#003366",
        "#f5f9ff",
        "#333",
        "#A1C4FD",
        "#003366",
    ),
    gradient_theme(
        "fuego",
        "Fuego",
        "linear-gradient(145deg, #CB356B, #BD3F32)",
        "white",
        "#f9f2f3",
        "#4d1024",
        "#CB356B",
        "#CB356B",
    ),
    gradient_theme(
        "bosque",
        "Bosque",
        "linear-gradient(145deg, #11998E, #38EF7D)",
        "white",
        "#f2fcf8",
        "#043d38",
        "#11998E",
        "#11998E",
    ),
    gradient_theme(
        "lluvia",
        "Lluvia",
        "linear-gradient(145deg, #396afc, #2948ff)",
        "white",
        "#f0f2ff",
        "#192d8b",
        "#396afc",
        "#396afc",
    ),
];

/// Look up a theme by key.
#[must_use]
pub fn theme(key: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.key == key)
}

#[must_use]
pub fn default_theme() -> &'static Theme {
    &THEMES[0]
}

/// Look up a theme by key, falling back to the default for unknown keys.
#[must_use]
pub fn resolve_theme(key: &str) -> &'static Theme {
    theme(key).unwrap_or_else(default_theme)
}
