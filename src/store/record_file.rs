//! CSV Backing File
//!
//! Reads and writes the customer list in fixed column order
//! `id, name, email, phone, address` under a single header row.

use std::fs::File;
use std::path::Path;

use crate::models::Customer;
use crate::store::StoreError;

/// Header row written at the top of every backing file.
pub const HEADER: [&str; 5] = ["ID", "Name", "Email", "Phone", "Address"];

const FIELD_COUNT: usize = HEADER.len();

// == Read ==
/// Parses every data row of the file at `path`.
///
/// The first line is treated as a header and skipped. Nothing is returned
/// unless every row parsed.
pub fn read_customers(path: &Path) -> Result<Vec<Customer>, StoreError> {
    let file = File::open(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut customers = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() != FIELD_COUNT {
            return Err(StoreError::Malformed {
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                found: record.len(),
            });
        }
        customers.push(Customer {
            id: record[0].to_string(),
            name: record[1].to_string(),
            email: record[2].to_string(),
            phone: record[3].to_string(),
            address: record[4].to_string(),
        });
    }

    Ok(customers)
}

// == Write ==
/// Overwrites the file at `path` with the header and one row per customer.
///
/// There is no temp-file-and-rename step: a failure part-way through can
/// leave a truncated file behind.
pub fn write_customers(path: &Path, customers: &[Customer]) -> Result<(), StoreError> {
    let file = File::create(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(HEADER)?;
    for customer in customers {
        writer.write_record(customer.to_record())?;
    }
    writer.flush().map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn customer(id: &str, name: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
            phone: "555-0100".to_string(),
            address: "1 Main St".to_string(),
        }
    }

    #[test]
    fn test_write_includes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customers.csv");

        write_customers(&path, &[customer("a1", "Ana")]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("ID,Name,Email,Phone,Address"));
        assert_eq!(
            lines.next(),
            Some("a1,Ana,a1@example.com,555-0100,1 Main St")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customers.csv");
        let mut c = customer("a1", "Ana");
        c.address = "Calle 5, Piso 2".to_string();

        write_customers(&path, &[c.clone()]).unwrap();
        let loaded = read_customers(&path).unwrap();

        assert_eq!(loaded, vec![c]);
    }

    #[test]
    fn test_read_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customers.csv");
        fs::write(&path, "ID,Name,Email,Phone,Address\n").unwrap();

        assert!(read_customers(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_short_row_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customers.csv");
        fs::write(
            &path,
            "ID,Name,Email,Phone,Address\na1,Ana,ana@example.com,555,Street\nb2,Bob\n",
        )
        .unwrap();

        let result = read_customers(&path);
        assert!(matches!(
            result,
            Err(StoreError::Malformed { line: 3, found: 2 })
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_customers(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
