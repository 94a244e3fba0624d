//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, Base64, random tokens)
//! - Signed, short-lived access tokens
//! - Outbound mail port with logging and HTTP relay adapters

pub mod crypto;
pub mod mail;
pub mod token;
