//! GlowOnCall Booking Server
//!
//! REST JSON API for the GlowOnCall home beauty service: booking sessions
//! with per-field validation, advance pricing, and WhatsApp handoff.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
