//! Bearer-token authentication gate and role guards for axum services.
//!
//! Request flow: `middleware::auth::token` → `services::auth` (signature check) →
//! `middleware::auth::access` (attaches `AuthCtx`) → `middleware::auth::guard` → handler.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_support;
