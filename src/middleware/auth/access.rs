//! Access token verification → AuthCtx into request extensions.
//!
//! Per request there are exactly two outcomes:
//! - continue with an `AuthCtx` attached
//! - reject with `AppError` (403 no credential / 401 invalid credential)
//!
//! No retry: one failed verification is final for that request.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, request::Parts},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::middleware::auth::token;
use crate::services::auth::TokenVerifier;
use crate::state::AppState;

/// Put the authentication gate in front of every route of `router`.
///
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

/// Extract + verify. The verifier is never called when no token is found.
pub fn authenticate<V>(verifier: &V, parts: &Parts) -> Result<AuthCtx, AppError>
where
    V: TokenVerifier + ?Sized,
{
    let Some(token) = token::extract(&parts.headers, &parts.uri) else {
        tracing::warn!(
            reason = "missing_credential",
            path = %parts.uri.path(),
            "no token provided"
        );
        return Err(AppError::MissingCredential);
    };

    let claims = match verifier.verify(&token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(
                reason = "invalid_credential",
                path = %parts.uri.path(),
                error = %err,
                "access token verification failed"
            );
            return Err(AppError::InvalidCredential);
        }
    };

    let auth_ctx = AuthCtx::from(claims);
    let user_id = auth_ctx.user_id().map(ToString::to_string);
    let employee_id = auth_ctx.employee_id().map(ToString::to_string);

    tracing::info!(
        user_id = user_id.as_deref().unwrap_or("-"),
        employee_id = employee_id.as_deref().unwrap_or("-"),
        roles = auth_ctx.roles().len(),
        "token successfully verified"
    );

    Ok(auth_ctx)
}

async fn access_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_ctx = authenticate(state.auth.as_ref(), &parts)?;

    // middleware → guards / extractor
    parts.extensions.insert(auth_ctx);

    Ok(next.run(Request::from_parts(parts, body)).await)
}
