//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The dashboard controller owns map truth outside the reactive graph;
//! `dashboard` holds the plain snapshot components render from and the
//! intent queue they write to.

pub mod dashboard;
