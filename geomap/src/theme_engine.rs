//! Runtime theme application.
//!
//! SYSTEM CONTEXT
//! ==============
//! Applying a theme touches the page in two tiers:
//!
//! 1. Style variables on the document root plus the root day/night attribute.
//!    These are written synchronously through a [`StyleSurface`].
//! 2. A fixed table of legacy [`Region`]s that read colors inline instead of
//!    from variables. [`ThemeEngine::apply`] returns a [`StylePlan`] listing
//!    the exact inline writes; the host runs that pass after
//!    [`REGION_PASS_DELAY_MS`](crate::consts::REGION_PASS_DELAY_MS) so freshly
//!    rendered regions are present, and skips it if a newer apply happened.
//!
//! The engine owns the active theme. It starts `Uninitialized`, moves to
//! `Loading` while the stored preference is fetched, and then stays in
//! `Applied`. Persisting a choice is fire-and-forget: a failed save is logged
//! and the visual change stays.

use std::future::Future;

use crate::error::ServiceError;
use crate::theme::{NIGHT_TEXT, Theme, default_theme, resolve_theme};

#[cfg(test)]
#[path = "theme_engine_test.rs"]
mod theme_engine_test;

/// Writes root-level style state.
pub trait StyleSurface {
    /// Set a CSS custom property on the document root.
    fn set_variable(&mut self, name: &str, value: &str);
    /// Set the root day/night attribute (`"light"` or `"night"`).
    fn set_day_night(&mut self, value: &str);
}

/// Remote storage of the user's theme choice.
pub trait PreferenceService {
    fn preferred_theme(&self) -> impl Future<Output = Result<Option<String>, ServiceError>>;
    fn set_preferred_theme(&self, name: &str) -> impl Future<Output = Result<(), ServiceError>>;
}

/// Legacy page regions restyled inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    TopBar,
    BrandTitle,
    SideNav,
    ContentArea,
    FeedContainer,
    Card,
    CardText,
    PrimaryButton,
    Dropdown,
    DropdownSecondaryText,
    Modal,
}

impl Region {
    pub const ALL: [Region; 11] = [
        Self::TopBar,
        Self::BrandTitle,
        Self::SideNav,
        Self::ContentArea,
        Self::FeedContainer,
        Self::Card,
        Self::CardText,
        Self::PrimaryButton,
        Self::Dropdown,
        Self::DropdownSecondaryText,
        Self::Modal,
    ];

    /// CSS selector matching the region's elements.
    #[must_use]
    pub fn selector(self) -> &'static str {
        match self {
            Self::TopBar => "header",
            Self::BrandTitle => "header strong",
            Self::SideNav => ".sidebar, .filter-sidebar",
            Self::ContentArea => ".flex.bg-white, .content-area",
            Self::FeedContainer => ".feed-container",
            Self::Card => ".card, .event-card",
            Self::CardText => ".event-card h4, .event-card p, .event-card span, .event-card div",
            Self::PrimaryButton => ".btn-primary",
            Self::Dropdown => ".dropdown-content, .dropdown-content-container",
            Self::DropdownSecondaryText => ".dropdown-content small, .dropdown-content .text-muted",
            Self::Modal => ".modal-box",
        }
    }

    /// Matched elements inside an ancestor matching this selector are left alone.
    #[must_use]
    pub fn skip_within(self) -> Option<&'static str> {
        match self {
            Self::CardText => Some("button, .badge"),
            _ => None,
        }
    }
}

/// One inline write on every element of a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleOp {
    /// Set an inline property; an empty value removes it.
    Property(&'static str, String),
    /// Add (`true`) or remove (`false`) a class.
    Class(&'static str, bool),
    Attribute(&'static str, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionStyle {
    pub region: Region,
    pub ops: Vec<StyleOp>,
}

/// Everything one theme application writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylePlan {
    seq: u64,
    pub theme: &'static str,
    pub variables: Vec<(&'static str, String)>,
    pub day_night: &'static str,
    pub regions: Vec<RegionStyle>,
}

impl StylePlan {
    #[must_use]
    pub fn region(&self, region: Region) -> Option<&RegionStyle> {
        self.regions.iter().find(|r| r.region == region)
    }
}

const DROPDOWN_SHADOW: &str = "0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06)";

fn prop(name: &'static str, value: impl Into<String>) -> StyleOp {
    StyleOp::Property(name, value.into())
}

/// Root style variables for `theme`.
#[must_use]
pub fn variables_for(theme: &Theme) -> Vec<(&'static str, String)> {
    vec![
        ("--body-bg", theme.body_bg.to_owned()),
        ("--card-bg", theme.card_bg.to_owned()),
        ("--card-text-color", theme.card_text.to_owned()),
        ("--card-border", theme.card_border().to_owned()),
        ("--btn-primary-bg", theme.btn_primary_bg.to_owned()),
        ("--btn-primary-hover", theme.btn_primary_hover().to_owned()),
    ]
}

/// Inline writes for every region in [`Region::ALL`].
#[must_use]
pub fn regions_for(theme: &Theme) -> Vec<RegionStyle> {
    let night = theme.is_night();
    Region::ALL
        .iter()
        .map(|&region| {
            let ops = match region {
                Region::TopBar => vec![
                    prop("background", theme.header_bg),
                    prop("color", theme.header_text),
                    StyleOp::Class("aurora-animation", theme.animated_header),
                ],
                Region::BrandTitle => vec![prop("color", theme.brand.color), prop("text-shadow", theme.brand_shadow())],
                Region::SideNav => vec![prop("background", theme.sidebar_bg), prop("color", theme.sidebar_text)],
                Region::ContentArea => vec![prop("background-color", if night { theme.body_bg } else { "#ffffff" })],
                Region::FeedContainer => vec![prop("background-color", if night { theme.card_bg } else { "#f9fafb" })],
                Region::Card => vec![prop("background-color", theme.card_bg), prop("color", theme.card_text)],
                Region::CardText => vec![prop("color", if night { NIGHT_TEXT } else { "" })],
                Region::PrimaryButton => vec![
                    prop("background-color", theme.btn_primary_bg),
                    prop("border-color", theme.btn_primary_bg),
                ],
                Region::Dropdown => vec![
                    prop("background-color", theme.dropdown_bg()),
                    prop("border", format!("1px solid {}", theme.accent())),
                    prop("color", "#000000"),
                    prop("box-shadow", DROPDOWN_SHADOW),
                ],
                Region::DropdownSecondaryText => vec![prop("color", "#333333")],
                Region::Modal => vec![StyleOp::Attribute("data-theme", theme.key.to_owned())],
            };
            RegionStyle { region, ops }
        })
        .collect()
}

/// Lifecycle of the active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeState {
    #[default]
    Uninitialized,
    /// Stored preference requested, nothing applied yet.
    Loading,
    Applied(&'static str),
}

#[derive(Debug, Default)]
pub struct ThemeEngine {
    state: ThemeState,
    seq: u64,
}

impl ThemeEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> ThemeState {
        self.state
    }

    /// The active theme, or the default before anything was applied.
    #[must_use]
    pub fn active(&self) -> &'static Theme {
        match self.state {
            ThemeState::Applied(key) => resolve_theme(key),
            _ => default_theme(),
        }
    }

    /// Mark the stored preference as requested. Returns `false` unless the
    /// engine was uninitialized.
    pub fn begin_loading(&mut self) -> bool {
        if self.state != ThemeState::Uninitialized {
            return false;
        }
        self.state = ThemeState::Loading;
        true
    }

    /// Apply the stored preference fetched after [`Self::begin_loading`].
    ///
    /// Returns `None` when a theme was already applied in the meantime; the
    /// explicit choice wins over the stored one.
    pub fn finish_loading<T: StyleSurface>(
        &mut self,
        surface: &mut T,
        stored: Result<Option<String>, ServiceError>,
    ) -> Option<StylePlan> {
        if matches!(self.state, ThemeState::Applied(_)) {
            return None;
        }
        let name = match stored {
            Ok(Some(name)) => name,
            Ok(None) => default_theme().key.to_owned(),
            Err(e) => {
                log::warn!("could not load theme preference, using default: {e}");
                default_theme().key.to_owned()
            }
        };
        Some(self.apply(surface, &name))
    }

    /// Make `name` the active theme and write its variables. Unknown names
    /// apply the default theme. Returns the region pass to run after the
    /// deferral delay.
    pub fn apply<T: StyleSurface>(&mut self, surface: &mut T, name: &str) -> StylePlan {
        let theme = resolve_theme(name);
        if theme.key != name {
            log::warn!("unknown theme {name:?}, applying {}", theme.key);
        }
        let variables = variables_for(theme);
        for (variable, value) in &variables {
            surface.set_variable(variable, value);
        }
        surface.set_day_night(theme.day_night());
        self.state = ThemeState::Applied(theme.key);
        self.seq += 1;
        StylePlan {
            seq: self.seq,
            theme: theme.key,
            variables,
            day_night: theme.day_night(),
            regions: regions_for(theme),
        }
    }

    /// Whether `plan` came from the most recent apply.
    #[must_use]
    pub fn is_current(&self, plan: &StylePlan) -> bool {
        plan.seq == self.seq
    }
}

/// Save `name` as the preferred theme. Failures are logged, never retried.
pub async fn persist_theme<P: PreferenceService>(preferences: &P, name: &str) -> bool {
    match preferences.set_preferred_theme(name).await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("theme preference not saved ({name}): {e}");
            false
        }
    }
}
