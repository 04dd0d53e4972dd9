use jsonwebtoken::Validation;
use serde::{Deserialize, Deserializer, Serialize};
use std::{error::Error as StdError, fmt};

use crate::services::auth::key::VerificationKey;

// Errors returned by access-token verification.
// The gate collapses every variant into a single "invalid credential" rejection.
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    EmptyToken,
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::EmptyToken => write!(f, "empty token"),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            Self::EmptyToken => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// An identifier as the issuer wrote it: database ids arrive as numbers, others as strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ClaimId {
    Num(i64),
    Str(String),
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{}", n),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ClaimId {
    fn from(n: i64) -> Self {
        Self::Num(n)
    }
}

impl From<&str> for ClaimId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

/// A role as embedded in the token. Names compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleClaim {
    pub id: ClaimId,
    pub name: String,
}

impl RoleClaim {
    pub fn is(&self, role: &str) -> bool {
        self.name
            .chars()
            .flat_map(char::to_lowercase)
            .eq(role.chars().flat_map(char::to_lowercase))
    }
}

// `"roles": null` reads the same as no `roles` at all.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RoleClaim>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RoleClaim>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Access token (JWT) claims.
///
/// NOTE:
/// - `_id` / `employeeId` are kept as-is (string or number); a token without them yields `None`.
/// - a token without `roles`, or with `"roles": null`, yields an empty list.
/// - registered claims (`exp`, `iss`, `aud` ...) are validated by jsonwebtoken and not kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(rename = "_id", default)]
    pub user_id: Option<ClaimId>,
    #[serde(rename = "employeeId", default)]
    pub employee_id: Option<ClaimId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub roles: Vec<RoleClaim>,
}

/// Anything able to turn a bearer token into verified claims.
///
/// Implementations must not perform I/O per call.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError>;
}

/// Public-key access-token verifier.
///
/// - Exactly one algorithm is accepted (the one the key was loaded for).
/// - `exp` / `nbf` are enforced when present; `iss` / `aud` only when configured.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    key: VerificationKey,
    validation: Validation,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("key", &self.key)
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(
        key: VerificationKey,
        issuer: Option<&str>,
        audience: Option<&str>,
        leeway_seconds: u64,
    ) -> Self {
        let mut validation = Validation::new(key.algorithm());
        // Tokens without `exp` are accepted; an `exp` in the past is not. Same for `nbf`.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = leeway_seconds;

        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
            validation.required_spec_claims.insert("iss".to_string());
        }

        match audience {
            Some(audience) => {
                validation.set_audience(&[audience]);
                validation.required_spec_claims.insert("aud".to_string());
            }
            None => validation.validate_aud = false,
        }

        Self { key, validation }
    }

    pub fn algorithm(&self) -> jsonwebtoken::Algorithm {
        self.key.algorithm()
    }
}

impl TokenVerifier for AuthService {
    // Verify and decode a JWT access token.
    fn verify(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        if token.trim().is_empty() {
            return Err(AccessJwtError::EmptyToken);
        }

        let data = jsonwebtoken::decode::<AccessTokenClaims>(
            token,
            self.key.decoding_key(),
            &self.validation,
        )?;

        Ok(data.claims)
    }
}
