use std::sync::Arc;

use crate::auth::TokenService;
use crate::store::Store;

/// Shared application state handed to every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: TokenService,
    /// bcrypt cost factor for new password hashes.
    pub hash_cost: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenService, hash_cost: u32) -> Self {
        Self {
            store,
            tokens,
            hash_cost,
        }
    }
}
