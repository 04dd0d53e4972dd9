/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - holds the token verifier; key material inside is read-only after startup
 * - Cloned per request (inside is Arc, clone is cheap)
 */
use std::sync::Arc;

use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}
