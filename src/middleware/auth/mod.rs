/*
 * Responsibility
 * - token: pull the bearer token out of a request
 * - access: verify it and attach AuthCtx (authentication)
 * - guard: role checks on the attached AuthCtx (authorization)
 */
pub mod access;
pub mod guard;
pub mod token;
