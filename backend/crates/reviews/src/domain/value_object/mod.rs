//! Value Object Module

pub mod post_text;
pub mod score;
