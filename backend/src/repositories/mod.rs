//! Data access layer: one repository per persisted entity.

pub mod account_repository;
pub mod reset_repository;
