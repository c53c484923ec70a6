pub mod sheets;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use sheets::SheetsClient;

/// Row store failure; every variant surfaces as an internal server error
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store rejected request ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Narrow capability interface over the external spreadsheet service
///
/// Handlers depend on this trait rather than the concrete client so tests
/// can substitute an in-memory fake.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Read a single-column range; one string per populated cell
    async fn read_column(&self, range: &str) -> Result<Vec<String>, StoreError>;

    /// Append one row to the given range
    async fn append_row(&self, range: &str, row: Vec<String>) -> Result<(), StoreError>;
}

/// Shared store handle held in application state
pub type SharedRowStore = Arc<dyn RowStore>;
