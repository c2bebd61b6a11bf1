//! Shared utilities for the authentication core.

pub mod crypto;
pub mod generate_reset_code;
pub mod jwt;
