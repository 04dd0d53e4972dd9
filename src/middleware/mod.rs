/*
 * Responsibility
 * - Public interface of the middleware layer
 * - auth (gate + role guards), http (cross-cutting transport concerns)
 */
pub mod auth;
pub mod http;
