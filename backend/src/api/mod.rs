//! Shared API plumbing: response envelope and error mapping.

pub mod common;
