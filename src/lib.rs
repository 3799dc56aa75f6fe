//! forgedesk - login, sessions and route protection for the workshop
//! management app.
//!
//! Session tokens are unsigned base64 JSON and passwords are compared in
//! plain text. This layer decides who sees which page; it is not a security
//! boundary.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod ui;

pub use config::Config;
pub use error::Error;
