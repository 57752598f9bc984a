//! Customer record

use serde::{Deserialize, Serialize};

use crate::models::CustomerInput;

/// A single customer as held in memory and persisted to the CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Customer {
    /// Builds a customer from client input under a server-owned id.
    pub fn from_input(id: impl Into<String>, input: CustomerInput) -> Self {
        Self {
            id: id.into(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
        }
    }

    /// Fields in persisted column order.
    pub fn to_record(&self) -> [&str; 5] {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.address.as_str(),
        ]
    }
}
