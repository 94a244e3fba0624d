//! Catalog Backend Module
//!
//! Titles and the two vocabularies that classify them, categories and
//! genres.
//!
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Reads are open to anonymous callers; writes are admin-only. A title's
//! rating is computed from its reviews at query time.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::{catalog_router, catalog_router_generic};
