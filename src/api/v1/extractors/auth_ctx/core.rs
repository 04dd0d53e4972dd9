use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::AuthCtx;

/// Extractor handing the AuthCtx to a handler.
/// Assumes the access middleware already inserted it into request.extensions().
/// Missing means the route was wired without the middleware: fail closed with 500.
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or_else(|| {
                tracing::error!(
                    reason = "identity_context_missing",
                    "handler reached without authentication middleware"
                );
                AppError::Internal
            })
    }
}
