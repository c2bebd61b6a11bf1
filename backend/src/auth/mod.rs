//! Authentication module for managing accounts, credentials, and sessions.
//!
//! This module provides the public interface for user authentication-related
//! functionalities such as registration, login, password reset, and the
//! bearer-token middleware protecting authenticated routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
