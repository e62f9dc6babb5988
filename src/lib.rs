//! Book Reservation Server
//!
//! A REST JSON API for a small book catalog and its reservation ledger:
//! books are listed, searched and edited, reserved and returned, and the
//! reserved / available / history views are derived from the ledger.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
