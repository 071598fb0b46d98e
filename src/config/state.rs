// Application state module
// Shared state handed to every request: configuration plus the store

use super::types::Config;
use crate::store::SquirrelStore;

/// Application state
///
/// The handler is stateless across requests apart from this shared
/// value; the store re-reads its file on every operation.
pub struct AppState {
    pub config: Config,
    pub store: SquirrelStore,
}

impl AppState {
    pub const fn new(config: Config, store: SquirrelStore) -> Self {
        Self { config, store }
    }
}
