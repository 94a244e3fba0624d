//! Reviews Backend Module
//!
//! Reviews of titles and the comments under them.
//!
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Rules
//! - One review per author and title, checked before the insert and backed
//!   by a unique constraint
//! - Scores are integers from 1 to 10
//! - Everything is listed oldest first and scoped to the parent in the path
//! - Authors, moderators and admins may edit or delete a post

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use error::{ReviewError, ReviewResult};
pub use infra::postgres::PgReviewRepository;
pub use presentation::router::{reviews_router, reviews_router_generic};
