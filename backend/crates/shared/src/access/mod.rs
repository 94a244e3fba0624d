//! Access Control
//!
//! Roles, the authenticated actor, and the policy table every write
//! operation is checked against.

pub mod actor;
#[cfg(feature = "axum")]
pub mod extract;
pub mod policy;
pub mod role;

pub use actor::Actor;
#[cfg(feature = "axum")]
pub use extract::CurrentActor;
pub use policy::{AccessDenied, Action, Requirement, authorize};
pub use role::UserRole;
