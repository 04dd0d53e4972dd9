//! Shared fixtures for unit tests: PEM key pairs and token minting.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;

use crate::services::auth::AuthService;
use crate::services::auth::key::VerificationKey;
use crate::state::AppState;

pub const ED25519_PRIVATE_PEM: &str = include_str!("../testdata/ed25519-private.pem");
pub const ED25519_PUBLIC_PEM: &str = include_str!("../testdata/ed25519-public.pem");
// Signer the service does not trust.
pub const ED25519_OTHER_PRIVATE_PEM: &str = include_str!("../testdata/ed25519-other-private.pem");
pub const RSA_PRIVATE_PEM: &str = include_str!("../testdata/rsa-private.pem");
pub const RSA_PUBLIC_PEM: &str = include_str!("../testdata/rsa-public.pem");
pub const EC_P256_PRIVATE_PEM: &str = include_str!("../testdata/ec-p256-private.pem");
pub const EC_P256_PUBLIC_PEM: &str = include_str!("../testdata/ec-p256-public.pem");

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn mint<T: Serialize>(algorithm: Algorithm, private_key_pem: &str, claims: &T) -> String {
    let pem = private_key_pem.as_bytes();
    let key = match algorithm {
        Algorithm::EdDSA => EncodingKey::from_ed_pem(pem),
        Algorithm::ES256 | Algorithm::ES384 => EncodingKey::from_ec_pem(pem),
        _ => EncodingKey::from_rsa_pem(pem),
    }
    .unwrap();

    let mut header = Header::new(algorithm);
    header.typ = Some("JWT".to_string());
    jsonwebtoken::encode(&header, claims, &key).unwrap()
}

/// Token signed by the trusted Ed25519 key, valid for ten minutes.
pub fn token_with_roles(roles: &[(i64, &str)]) -> String {
    let roles: Vec<_> = roles
        .iter()
        .map(|(id, name)| serde_json::json!({ "id": id, "name": name }))
        .collect();

    mint(
        Algorithm::EdDSA,
        ED25519_PRIVATE_PEM,
        &serde_json::json!({
            "_id": "u1",
            "employeeId": "e1",
            "roles": roles,
            "exp": now() + 600,
        }),
    )
}

pub fn eddsa_service() -> AuthService {
    let key = VerificationKey::from_pem(Algorithm::EdDSA, ED25519_PUBLIC_PEM).unwrap();
    AuthService::new(key, None, None, 0)
}

pub fn app_state() -> AppState {
    AppState::new(Arc::new(eddsa_service()))
}
