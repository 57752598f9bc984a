//! Customer CRM - A small customer records service
//!
//! CRUD over a CSV-backed customer list, plus echo/upload demo endpoints
//! and a JWT-protected route.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod store;
pub mod validation;

pub use api::AppState;
pub use config::Config;
pub use error::{AppError, Result};
