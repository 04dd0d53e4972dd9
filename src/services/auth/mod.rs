pub mod access_jwt;
pub mod factory;
pub mod key;

pub use access_jwt::{
    AccessJwtError, AccessTokenClaims, AuthService, ClaimId, RoleClaim, TokenVerifier,
};
pub use factory::build_auth_service;
