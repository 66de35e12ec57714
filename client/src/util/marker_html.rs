//! HTML for Leaflet div-icons and popups.
//!
//! Pure string builders so the look of markers can be tested without a
//! browser. Every piece of entity text passes through [`escape_html`];
//! popup buttons carry their action token in `data-gp-action`.

use geomap::surface::{MarkerIcon, PopupContent};

#[cfg(test)]
#[path = "marker_html_test.rs"]
mod marker_html_test;

/// Attribute the Leaflet bridge looks for on popup buttons.
pub const ACTION_ATTR: &str = "data-gp-action";

/// A rendered div-icon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconHtml {
    pub html: String,
    pub class_name: &'static str,
    pub size_px: u32,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn icon_html(icon: &MarkerIcon) -> IconHtml {
    match icon {
        MarkerIcon::Category { color, letter, size_px, highlighted } => {
            let ring = if *highlighted { "#ffd700" } else { "white" };
            let html = format!(
                "<div style=\"width:{size_px}px;height:{size_px}px;background:{color};border:3px solid {ring};\
                 border-radius:50%;display:flex;align-items:center;justify-content:center;color:white;\
                 font-weight:bold;font-size:12px;box-shadow:0 2px 4px rgba(0,0,0,0.3);\">{}</div>",
                escape_html(&letter.to_string())
            );
            IconHtml { html, class_name: "event-marker", size_px: *size_px }
        }
        MarkerIcon::OwnLocation { size_px } => {
            let dot = size_px / 2;
            let html = format!(
                "<div class=\"user-location-pulse\" style=\"width:{size_px}px;height:{size_px}px;\
                 display:flex;align-items:center;justify-content:center;\">\
                 <div style=\"width:{dot}px;height:{dot}px;background:#007bff;border:3px solid white;\
                 border-radius:50%;box-shadow:0 0 10px rgba(0,123,255,0.6);\"></div></div>"
            );
            IconHtml { html, class_name: "user-location-marker", size_px: *size_px }
        }
        MarkerIcon::Pin { color, size_px } => {
            let html = format!(
                "<div style=\"width:{size_px}px;height:{size_px}px;background:{color};border:2px solid white;\
                 border-radius:50% 50% 50% 0;transform:rotate(-45deg);box-shadow:0 2px 4px rgba(0,0,0,0.3);\"></div>"
            );
            IconHtml { html, class_name: "search-pin-marker", size_px: *size_px }
        }
    }
}

/// Popup body, or `None` when there is nothing to show.
pub fn popup_html(popup: &PopupContent) -> Option<String> {
    if popup.title.is_empty() && popup.lines.is_empty() && popup.actions.is_empty() {
        return None;
    }
    let mut html = String::from("<div class=\"gp-popup\" style=\"min-width:240px;max-width:400px;padding:8px;\">");
    if !popup.title.is_empty() {
        html.push_str(&format!(
            "<h5 style=\"margin:0 0 8px 0;color:#333;font-size:16px;font-weight:bold;\">{}</h5>",
            escape_html(&popup.title)
        ));
    }
    for line in &popup.lines {
        html.push_str(&format!("<p style=\"margin:0 0 6px 0;font-size:13px;color:#555;\">{}</p>", escape_html(line)));
    }
    if !popup.actions.is_empty() {
        html.push_str("<div style=\"display:flex;gap:6px;margin-top:8px;\">");
        for action in &popup.actions {
            html.push_str(&format!(
                "<button type=\"button\" class=\"btn btn-sm btn-primary\" {ACTION_ATTR}=\"{}\">{}</button>",
                action.token(),
                escape_html(action.label())
            ));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    Some(html)
}
