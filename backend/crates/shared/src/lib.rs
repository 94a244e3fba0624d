//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of vocabulary shared by the
//! identity, catalog and review crates:
//! - Common error types and result aliases
//! - Typed ID wrappers
//! - Roles, the authenticated actor, and the access policy table
//! - Rating aggregation over review scores
//! - Search pattern helpers for list filters
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod access;
#[cfg(feature = "axum")]
pub mod body;
pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod query;
pub mod rating;
