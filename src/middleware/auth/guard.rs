//! Role guards: allow the request through only when the AuthCtx carries a role.
//!
//! Guards only read the AuthCtx. They are independent and stack: every guard on a
//! route has to pass. A guard that finds no AuthCtx is a wiring error (no access
//! middleware in front of it) and denies with 500.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGuard {
    role: &'static str,
    status: StatusCode,
    message: &'static str,
}

// The differing statuses (401 vs 403) are the established API contract.
pub const ADMIN: RoleGuard = RoleGuard::new(
    "admin",
    StatusCode::UNAUTHORIZED,
    "Admin role required - Unauthorized!",
);

pub const MODERATOR: RoleGuard = RoleGuard::new(
    "moderator",
    StatusCode::FORBIDDEN,
    "Mod role required - Unauthorized!",
);

impl RoleGuard {
    pub const fn new(role: &'static str, status: StatusCode, message: &'static str) -> Self {
        Self {
            role,
            status,
            message,
        }
    }

    pub fn role(&self) -> &'static str {
        self.role
    }

    pub fn check(&self, auth_ctx: Option<&AuthCtx>) -> Result<(), AppError> {
        let Some(auth_ctx) = auth_ctx else {
            tracing::error!(
                guard = self.role,
                reason = "identity_context_missing",
                "role guard reached without authentication middleware"
            );
            return Err(AppError::Internal);
        };

        if auth_ctx.has_role(self.role) {
            tracing::debug!(guard = self.role, "user authorized to access this resource");
            return Ok(());
        }

        let user_id = auth_ctx.user_id().map(ToString::to_string);
        tracing::warn!(
            guard = self.role,
            reason = "insufficient_role",
            user_id = user_id.as_deref().unwrap_or("-"),
            "user not authorized to access this resource"
        );
        Err(AppError::InsufficientRole {
            status: self.status,
            message: self.message,
        })
    }
}

/// Put `guard` in front of every route of `router`.
///
/// Layers added later run first, so the access middleware must be applied after
/// (outside) all guards:
/// ```ignore
/// let admin = guard::apply(Router::new().route("/admin", get(h)), guard::ADMIN);
/// let admin = access::apply(admin, state.clone());
/// ```
pub fn apply(router: Router<AppState>, guard: RoleGuard) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(guard, role_guard_middleware))
}

async fn role_guard_middleware(
    State(guard): State<RoleGuard>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    guard.check(req.extensions().get::<AuthCtx>())?;
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::access;
    use crate::services::auth::{AccessTokenClaims, ClaimId, RoleClaim};
    use crate::test_support::{app_state, token_with_roles};
    use axum::routing::get;
    use tower::ServiceExt;

    fn ctx(roles: &[&str]) -> AuthCtx {
        AuthCtx::from(AccessTokenClaims {
            user_id: Some(ClaimId::from("u1")),
            employee_id: Some(ClaimId::from("e1")),
            roles: roles
                .iter()
                .enumerate()
                .map(|(i, name)| RoleClaim {
                    id: ClaimId::Num(i as i64 + 1),
                    name: name.to_string(),
                })
                .collect(),
        })
    }

    #[test]
    fn admin_guard_allows_admin_in_any_case() {
        assert!(ADMIN.check(Some(&ctx(&["Admin"]))).is_ok());
        assert!(ADMIN.check(Some(&ctx(&["viewer", "ADMIN"]))).is_ok());
    }

    #[test]
    fn admin_guard_denies_with_401() {
        let err = ADMIN.check(Some(&ctx(&["viewer"]))).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Admin role required - Unauthorized!");
    }

    #[test]
    fn moderator_guard_is_case_insensitive() {
        for name in ["MODERATOR", "Moderator", "moderator"] {
            assert!(MODERATOR.check(Some(&ctx(&[name]))).is_ok());
        }
    }

    #[test]
    fn moderator_guard_denies_with_403() {
        let err = MODERATOR.check(Some(&ctx(&["admin"]))).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "Mod role required - Unauthorized!");
    }

    #[test]
    fn empty_role_list_is_a_denial() {
        let err = ADMIN.check(Some(&ctx(&[]))).unwrap_err();
        assert!(matches!(err, AppError::InsufficientRole { .. }));
    }

    #[test]
    fn missing_context_fails_closed() {
        let err = ADMIN.check(None).unwrap_err();
        assert!(matches!(err, AppError::Internal));
        assert!(MODERATOR.check(None).is_err());
    }

    #[test]
    fn custom_guards_use_their_own_role() {
        let auditor = RoleGuard::new("auditor", StatusCode::FORBIDDEN, "Auditor role required");
        assert_eq!(auditor.role(), "auditor");
        assert!(auditor.check(Some(&ctx(&["Auditor"]))).is_ok());
        assert!(auditor.check(Some(&ctx(&["admin"]))).is_err());
    }

    async fn status_of(router: Router, authorization: Option<String>) -> StatusCode {
        let mut req = Request::builder().uri("/x");
        if let Some(value) = authorization {
            req = req.header("authorization", value);
        }
        router
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn guard_without_access_middleware_denies() {
        let state = app_state();
        let router = apply(Router::new().route("/x", get(|| async { "ok" })), ADMIN)
            .with_state(state);

        let bearer = format!("Bearer {}", token_with_roles(&[(1, "admin")]));
        assert_eq!(
            status_of(router, Some(bearer)).await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn stacked_guards_all_have_to_pass() {
        let state = app_state();
        let router = Router::new().route("/x", get(|| async { "ok" }));
        let router = apply(router, MODERATOR);
        let router = apply(router, ADMIN);
        let router = access::apply(router, state.clone()).with_state(state);

        let both = format!(
            "Bearer {}",
            token_with_roles(&[(1, "Admin"), (2, "moderator")])
        );
        let admin_only = format!("Bearer {}", token_with_roles(&[(1, "admin")]));
        let mod_only = format!("Bearer {}", token_with_roles(&[(2, "Moderator")]));

        assert_eq!(status_of(router.clone(), Some(both)).await, StatusCode::OK);
        assert_eq!(
            status_of(router.clone(), Some(admin_only)).await,
            StatusCode::FORBIDDEN
        );
        // admin guard runs first
        assert_eq!(
            status_of(router.clone(), Some(mod_only)).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(router, None).await, StatusCode::FORBIDDEN);
    }
}
