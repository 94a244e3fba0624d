//! Entity Module

pub mod comment;
pub mod post;
pub mod review;
