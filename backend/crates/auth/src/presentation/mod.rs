//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{ActorResolverState, resolve_actor};
pub use router::{actor_resolver_state, auth_router, auth_router_generic};
