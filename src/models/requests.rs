//! Request DTOs for the CRM API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Body of a create or update request, sent as JSON or as URL-encoded
/// form fields.
///
/// Any `id` the client sends is ignored; identifiers are assigned by the
/// server. Missing fields default to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CustomerInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}
