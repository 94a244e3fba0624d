//! Auth (Identity) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Passwordless signup: username + email, confirmation code by mail
//! - Code-for-token exchange (single-use codes, signed bearer tokens)
//! - Per-request actor resolution with the role read from the store
//! - Self profile (`/users/me`) and admin user management
//!
//! ## Security Model
//! - Only the SHA-256 digest of a confirmation code is stored
//! - Codes are compared in constant time and consumed on success
//! - Nobody can change their own role

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::{actor_resolver_state, auth_router, auth_router_generic};

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
