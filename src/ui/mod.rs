//! Terminal window for generating and copying iframe code.
//!
//! - [`app`]: window state and the actions that drive it.
//! - [`event_loop`]: maps terminal events to actions and runs the loop.
//! - [`renderer`] and [`wrap`]: frame composition.
//! - [`theme`]: colour policy.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core::session`] owns what the buttons actually do.

pub mod app;
pub mod event_loop;
pub mod lifecycle;
pub mod renderer;
pub mod theme;
pub mod wrap;
