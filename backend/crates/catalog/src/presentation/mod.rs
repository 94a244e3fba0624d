//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{TermAppState, TitleAppState};
pub use router::{catalog_router, catalog_router_generic};
