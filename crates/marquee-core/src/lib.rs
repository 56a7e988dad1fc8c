//! Catalog loading and view-state synchronization for the marquee browser.
//!
//! The crate is headless: controllers write through the [`view::RenderTarget`]
//! trait, and the retained [`view::Surface`] is what front ends draw from.

pub mod carousel;
pub mod catalog;
pub mod chrome;
pub mod config;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod notice;
pub mod platform;
pub mod search;
pub mod sections;
pub mod series;
pub mod state;
pub mod view;

pub use error::{ConfigError, FetchError, LoadError};
pub use state::ApplicationState;
