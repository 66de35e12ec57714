//! Theme writes against the live document.
//!
//! [`DocumentStyle`] is the [`StyleSurface`] for the `<html>` element: style
//! variables go on its inline style and the day/night flag goes in its
//! `data-theme` attribute. [`run_region_pass`] performs the deferred inline
//! writes of a [`StylePlan`] on every element its regions select.
//!
//! TRADE-OFFS
//! ==========
//! Both are browser-only; SSR paths no-op so server rendering stays
//! deterministic.

use geomap::theme_engine::{StylePlan, StyleSurface};
#[cfg(feature = "hydrate")]
use geomap::theme_engine::{RegionStyle, StyleOp};

#[cfg(test)]
#[path = "dom_style_test.rs"]
mod dom_style_test;

/// Root attribute carrying `"light"` or `"night"`.
pub const DAY_NIGHT_ATTR: &str = "data-theme";

#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentStyle;

#[cfg(feature = "hydrate")]
fn root_element() -> Option<web_sys::HtmlElement> {
    use wasm_bindgen::JsCast;

    let root = web_sys::window()?.document()?.document_element()?;
    root.dyn_into::<web_sys::HtmlElement>().ok()
}

impl StyleSurface for DocumentStyle {
    fn set_variable(&mut self, name: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(root) = root_element() else {
                return;
            };
            if root.style().set_property(name, value).is_err() {
                log::warn!("could not set {name}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (name, value);
        }
    }

    fn set_day_night(&mut self, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(root) = root_element() else {
                return;
            };
            if root.set_attribute(DAY_NIGHT_ATTR, value).is_err() {
                log::warn!("could not set {DAY_NIGHT_ATTR}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = value;
        }
    }
}

/// Apply every region of `plan` to the elements currently in the page.
/// Returns the number of elements written.
pub fn run_region_pass(plan: &StylePlan) -> usize {
    #[cfg(feature = "hydrate")]
    {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return 0;
        };
        plan.regions.iter().map(|region| apply_region(&document, region)).sum()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = plan;
        0
    }
}

#[cfg(feature = "hydrate")]
fn apply_region(document: &web_sys::Document, region: &RegionStyle) -> usize {
    use wasm_bindgen::JsCast;

    let Ok(nodes) = document.query_selector_all(region.region.selector()) else {
        log::warn!("bad selector for {:?}", region.region);
        return 0;
    };
    let skip = region.region.skip_within();
    let mut written = 0;
    for i in 0..nodes.length() {
        let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok()) else {
            continue;
        };
        if let Some(skip) = skip {
            if matches!(element.closest(skip), Ok(Some(_))) {
                continue;
            }
        }
        for op in &region.ops {
            apply_op(&element, op);
        }
        written += 1;
    }
    written
}

#[cfg(feature = "hydrate")]
fn apply_op(element: &web_sys::HtmlElement, op: &StyleOp) {
    let outcome = match op {
        StyleOp::Property(name, value) if value.is_empty() => element.style().remove_property(name).map(|_| ()),
        StyleOp::Property(name, value) => element.style().set_property(name, value),
        StyleOp::Class(name, on) => element.class_list().toggle_with_force(name, *on).map(|_| ()),
        StyleOp::Attribute(name, value) => element.set_attribute(name, value),
    };
    if outcome.is_err() {
        log::debug!("style op {op:?} rejected");
    }
}
