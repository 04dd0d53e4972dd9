//! Verification key material: the configured algorithm paired with its public key.
//!
//! Built once at startup and shared read-only afterwards. There is no reload path;
//! a new key means a new process.

use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey};

#[derive(Debug)]
pub enum KeyError {
    Pem {
        algorithm: Algorithm,
        source: jsonwebtoken::errors::Error,
    },
    UnsupportedAlgorithm(Algorithm),
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pem { algorithm, source } => {
                write!(f, "invalid public key pem for {:?}: {}", algorithm, source)
            }
            Self::UnsupportedAlgorithm(alg) => {
                write!(f, "{:?} is not a public-key algorithm", alg)
            }
        }
    }
}

impl std::error::Error for KeyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pem { source, .. } => Some(source),
            Self::UnsupportedAlgorithm(_) => None,
        }
    }
}

/// Public key plus the single algorithm tokens must be signed with.
///
/// Key material is not printable via Debug.
#[derive(Clone)]
pub struct VerificationKey {
    algorithm: Algorithm,
    decoding_key: DecodingKey,
}

impl fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationKey")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl VerificationKey {
    /// Parses `public_key_pem` with the parser matching the algorithm family.
    pub fn from_pem(algorithm: Algorithm, public_key_pem: &str) -> Result<Self, KeyError> {
        let pem = public_key_pem.as_bytes();

        let decoding_key = match algorithm {
            Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512 => DecodingKey::from_rsa_pem(pem),
            Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(pem),
            Algorithm::EdDSA => DecodingKey::from_ed_pem(pem),
            other => return Err(KeyError::UnsupportedAlgorithm(other)),
        }
        .map_err(|source| KeyError::Pem { algorithm, source })?;

        Ok(Self {
            algorithm,
            decoding_key,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}
