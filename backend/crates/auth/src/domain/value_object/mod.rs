//! Value Object Module

pub mod confirmation_code;
pub mod email;
pub mod profile;
pub mod user_name;
