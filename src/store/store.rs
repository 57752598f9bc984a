//! Customer Store Module
//!
//! Ordered in-memory customer list bound to its backing CSV file.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Customer, CustomerInput};
use crate::store::{read_customers, write_customers, StoreError};

const NOT_FOUND: &str = "Customer not found";

// == Customer Store ==
/// Customer working set plus the path it is mirrored to.
///
/// Every mutation rewrites the whole file before returning. If the write
/// fails the in-memory change is undone, so a failed mutation is never
/// visible to later reads.
#[derive(Debug)]
pub struct CustomerStore {
    /// Backing CSV file
    path: PathBuf,
    /// Customers in insertion order
    customers: Vec<Customer>,
}

impl CustomerStore {
    // == Constructors ==
    /// Creates an empty store bound to `path` without touching the file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            customers: Vec::new(),
        }
    }

    /// Creates a store bound to `path` and loads it.
    ///
    /// A missing file is created with just the header row.
    pub fn open(path: impl Into<PathBuf>) -> std::result::Result<Self, StoreError> {
        let mut store = Self::new(path);
        if store.path.exists() {
            store.load()?;
        } else {
            warn!(path = %store.path.display(), "Backing file missing, starting empty");
            store.save()?;
        }
        Ok(store)
    }

    // == Load ==
    /// Replaces the working set with the file contents.
    ///
    /// On any read or parse failure the current set is left untouched.
    pub fn load(&mut self) -> std::result::Result<(), StoreError> {
        let customers = read_customers(&self.path)?;
        self.customers = customers;
        info!(
            path = %self.path.display(),
            count = self.customers.len(),
            "Customers loaded"
        );
        Ok(())
    }

    // == Save ==
    /// Overwrites the backing file with the current working set.
    pub fn save(&self) -> std::result::Result<(), StoreError> {
        write_customers(&self.path, &self.customers)
    }

    // == Queries ==
    /// Looks a customer up by id.
    pub fn find_by_id(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// All customers in insertion order.
    pub fn list(&self) -> &[Customer] {
        &self.customers
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    // == Create ==
    /// Appends a new customer under a fresh id and persists.
    pub fn create(&mut self, input: CustomerInput) -> Result<Customer> {
        let id = self.fresh_id();
        let customer = Customer::from_input(id, input);
        self.customers.push(customer.clone());

        if let Err(err) = self.save() {
            self.customers.pop();
            return Err(err.into());
        }

        info!(id = %customer.id, "Customer created");
        Ok(customer)
    }

    // == Update ==
    /// Replaces every field of customer `id` except the id itself.
    pub fn update(&mut self, id: &str, input: CustomerInput) -> Result<Customer> {
        let index = self.position(id)?;
        let updated = Customer::from_input(id, input);
        let previous = std::mem::replace(&mut self.customers[index], updated.clone());

        if let Err(err) = self.save() {
            self.customers[index] = previous;
            return Err(err.into());
        }

        info!(id = %id, "Customer updated");
        Ok(updated)
    }

    // == Delete ==
    /// Removes customer `id` and persists.
    pub fn delete(&mut self, id: &str) -> Result<Customer> {
        let index = self.position(id)?;
        let removed = self.customers.remove(index);

        if let Err(err) = self.save() {
            self.customers.insert(index, removed);
            return Err(err.into());
        }

        info!(id = %id, "Customer deleted");
        Ok(removed)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.customers
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.find_by_id(&id).is_none() {
                return id;
            }
        }
    }
}
