//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard chrome and read the shared `DashboardUi`
//! snapshot from context. User actions are queued as intents; only
//! `map_host` talks to the controller.

pub mod address_search;
pub mod event_feed;
pub mod filter_sidebar;
pub mod map_host;
pub mod map_toolbar;
pub mod notice_banner;
pub mod theme_picker;
pub mod top_bar;
