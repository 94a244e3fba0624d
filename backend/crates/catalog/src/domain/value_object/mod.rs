//! Value Object Module

pub mod catalog_name;
pub mod release_year;
pub mod slug;
