//! Request and Response models for the CRM API
//!
//! This module defines the customer record and the DTOs (Data Transfer
//! Objects) used for serializing/deserializing HTTP bodies.

pub mod customer;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use customer::Customer;
pub use requests::CustomerInput;
pub use responses::{DeleteResponse, Envelope};
