/*
 * Responsibility
 * - Protected handlers; each one just echoes the identity it was handed
 * - Which gate/guards run in front of them is decided in routes.rs
 */
use axum::Json;

use crate::api::v1::{dto::identity::IdentityResponse, extractors::AuthCtxExtractor};

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<IdentityResponse> {
    Json(IdentityResponse::new("me", &ctx))
}

pub async fn admin(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<IdentityResponse> {
    Json(IdentityResponse::new("admin", &ctx))
}

pub async fn moderation(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<IdentityResponse> {
    Json(IdentityResponse::new("moderation", &ctx))
}

pub async fn admin_moderation(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<IdentityResponse> {
    Json(IdentityResponse::new("admin_moderation", &ctx))
}
