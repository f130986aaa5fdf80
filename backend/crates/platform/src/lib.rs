//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for feature crates:
//! - Cookie options and conversion to `axum_extra` cookies
//! - Random token generation

pub mod cookie;
pub mod crypto;
