//! Service modules grouping the business logic of the backend.

pub mod account_service;
pub mod notifier;
pub mod reset_service;
