/*
 * Responsibility
 * - v1 URL layout
 * - Decides which routes sit behind the access middleware and which role guards
 *
 * Layer order: guards first (inner), access middleware last (outer), so a guard
 * never runs before AuthCtx exists.
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{
    health::health,
    identity::{admin, admin_moderation, me, moderation},
};
use crate::middleware::auth::{access, guard};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let admin_routes = guard::apply(Router::new().route("/admin", get(admin)), guard::ADMIN);

    let moderation_routes = guard::apply(
        Router::new().route("/moderation", get(moderation)),
        guard::MODERATOR,
    );

    let staff_routes = Router::new().route("/admin/moderation", get(admin_moderation));
    let staff_routes = guard::apply(staff_routes, guard::MODERATOR);
    let staff_routes = guard::apply(staff_routes, guard::ADMIN);

    let protected = Router::new()
        .route("/me", get(me))
        .merge(admin_routes)
        .merge(moderation_routes)
        .merge(staff_routes);
    let protected = access::apply(protected, state);

    Router::new().route("/health", get(health)).merge(protected)
}
