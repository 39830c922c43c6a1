//! The `taskpad` library crate.
//!
//! Contains the domain models, authentication mechanisms, data-access layer,
//! routing configuration, and error handling for the taskpad service. The
//! binary (`main.rs`) wires these into a running actix-web server.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
