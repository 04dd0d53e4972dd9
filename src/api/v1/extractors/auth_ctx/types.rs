/*
 * Responsibility
 * - The "authenticated context" type handlers and role guards see
 * - The access middleware verifies the token, builds this once and stores it in request extensions
 *
 * Notes
 * - Signature/algorithm checks live in services/auth; this is only the contract
 * - Built once per request and never mutated afterwards (no setters)
 */
use crate::services::auth::{AccessTokenClaims, ClaimId, RoleClaim};

/// Identity attached to an authenticated request.
///
/// - `user_id` / `employee_id` are copied verbatim from the token (absent stays absent)
/// - `roles` is a membership list; order carries no meaning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    user_id: Option<ClaimId>,
    employee_id: Option<ClaimId>,
    roles: Vec<RoleClaim>,
}

impl AuthCtx {
    pub fn user_id(&self) -> Option<&ClaimId> {
        self.user_id.as_ref()
    }

    pub fn employee_id(&self) -> Option<&ClaimId> {
        self.employee_id.as_ref()
    }

    pub fn roles(&self) -> &[RoleClaim] {
        &self.roles
    }

    /// Linear scan, first case-insensitive match wins.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.is(role))
    }
}

impl From<AccessTokenClaims> for AuthCtx {
    fn from(claims: AccessTokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            employee_id: claims.employee_id,
            roles: claims.roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(roles: &[&str]) -> AuthCtx {
        AuthCtx::from(AccessTokenClaims {
            user_id: Some(ClaimId::from("u1")),
            employee_id: None,
            roles: roles
                .iter()
                .enumerate()
                .map(|(i, name)| RoleClaim {
                    id: ClaimId::Num(i as i64),
                    name: name.to_string(),
                })
                .collect(),
        })
    }

    #[test]
    fn claims_are_carried_verbatim() {
        let ctx = ctx(&[" admin "]);
        assert_eq!(ctx.user_id(), Some(&ClaimId::from("u1")));
        assert_eq!(ctx.employee_id(), None);
        assert_eq!(ctx.roles()[0].name, " admin ");
        // no trimming
        assert!(!ctx.has_role("admin"));
    }

    #[test]
    fn membership_ignores_case_and_order() {
        let ctx = ctx(&["viewer", "MODERATOR"]);
        assert!(ctx.has_role("moderator"));
        assert!(ctx.has_role("Viewer"));
        assert!(!ctx.has_role("admin"));
    }
}
