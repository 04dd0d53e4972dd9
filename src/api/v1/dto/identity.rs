/*
 * Responsibility
 * - Response DTO echoing the request identity (what protected handlers see)
 */
use serde::Serialize;

use crate::api::v1::extractors::AuthCtx;
use crate::services::auth::ClaimId;

#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub id: ClaimId,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub area: &'static str,
    pub user_id: Option<ClaimId>,
    pub employee_id: Option<ClaimId>,
    pub roles: Vec<RoleResponse>,
}

impl IdentityResponse {
    pub fn new(area: &'static str, ctx: &AuthCtx) -> Self {
        Self {
            area,
            user_id: ctx.user_id().cloned(),
            employee_id: ctx.employee_id().cloned(),
            roles: ctx
                .roles()
                .iter()
                .map(|r| RoleResponse {
                    id: r.id.clone(),
                    name: r.name.clone(),
                })
                .collect(),
        }
    }
}
