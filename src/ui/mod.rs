//! Server-rendered pages and role-gated navigation

pub mod handlers;
pub mod nav;

pub use handlers::*;
