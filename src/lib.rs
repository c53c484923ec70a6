//! Telegram Mini App Registration Server Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod security;
pub mod store;

pub use config::Config;
pub use error::{AppError, Result};
pub use store::{RowStore, SharedRowStore, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SharedRowStore,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given row store and configuration
    pub fn new(store: SharedRowStore, config: Config) -> Self {
        Self { store, config }
    }
}
