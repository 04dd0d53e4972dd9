/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::AuthService;
use crate::services::auth::key::{KeyError, VerificationKey};

pub fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, KeyError> {
    let key = VerificationKey::from_pem(config.key_algorithm, &config.public_key_pem)?;

    let auth = AuthService::new(
        key,
        config.auth_issuer.as_deref(),
        config.auth_audience.as_deref(),
        config.access_token_leeway_seconds,
    );

    Ok(Arc::new(auth))
}
