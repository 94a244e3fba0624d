//! Entity Module

pub mod term;
pub mod title;
