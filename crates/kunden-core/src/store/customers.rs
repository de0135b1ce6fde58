//! Customer record persistence.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Result, DATA_FILE, FILES_DIR};
use crate::error::StoreError;
use crate::models::customer::{normalize_name, Customer};

/// Flat JSON store of customer records keyed by opaque id.
pub struct CustomerStore {
    data_file: PathBuf,
    files_dir: PathBuf,
}

impl CustomerStore {
    /// Open a store in the given data directory, creating the attachment
    /// directory if needed. The record file is created lazily on first save.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let files_dir = data_dir.join(FILES_DIR);
        fs::create_dir_all(&files_dir)?;

        Ok(Self {
            data_file: data_dir.join(DATA_FILE),
            files_dir,
        })
    }

    /// Path of the record file.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Path of the attachment directory.
    pub fn files_dir(&self) -> &Path {
        &self.files_dir
    }

    /// Load all records. A missing record file is an empty store.
    pub fn load(&self) -> Result<Vec<Customer>> {
        if !self.data_file.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.data_file)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Look up a single record by id.
    pub fn get(&self, id: &str) -> Result<Option<Customer>> {
        Ok(self.load()?.into_iter().find(|c| c.id == id))
    }

    /// Insert or replace a record by id.
    pub fn save(&self, customer: &Customer) -> Result<()> {
        let mut customers = self.load()?;

        match customers.iter_mut().find(|c| c.id == customer.id) {
            Some(existing) => *existing = customer.clone(),
            None => customers.push(customer.clone()),
        }

        self.write(&customers)?;
        debug!("saved customer {} ({})", customer.id, customer.name);
        Ok(())
    }

    /// Remove a record by id.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut customers = self.load()?;
        let before = customers.len();
        customers.retain(|c| c.id != id);

        if customers.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.write(&customers)
    }

    /// Duplicate check: does a record with this name already exist?
    /// Case-insensitive, trimmed, exact match.
    pub fn contains_name(&self, name: &str) -> Result<bool> {
        let wanted = normalize_name(name);
        Ok(self
            .load()?
            .iter()
            .any(|c| c.normalized_name() == wanted))
    }

    fn write(&self, customers: &[Customer]) -> Result<()> {
        let json = serde_json::to_string_pretty(customers)?;
        fs::write(&self.data_file, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, CustomerStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CustomerStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_empty_store_loads_no_records() {
        let (_dir, store) = temp_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_get() {
        let (_dir, store) = temp_store();
        let customer = Customer::new("42", "Musterfirma GmbH", "Berlin", "030-1", "a@b.de");
        store.save(&customer).unwrap();

        let loaded = store.get("42").unwrap().unwrap();
        assert_eq!(loaded.name, "Musterfirma GmbH");
        assert_eq!(loaded.location, "Berlin");
    }

    #[test]
    fn test_save_upserts_by_id() {
        let (_dir, store) = temp_store();
        let mut customer = Customer::new("42", "Alt", "Berlin", "", "");
        store.save(&customer).unwrap();

        customer.name = "Neu".into();
        store.save(&customer).unwrap();

        let customers = store.load().unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].name, "Neu");
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = temp_store();
        store
            .save(&Customer::new("1", "A", "B", "", ""))
            .unwrap();

        store.delete("1").unwrap();
        assert!(store.load().unwrap().is_empty());

        assert!(matches!(store.delete("1"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_contains_name_is_case_insensitive_and_trimmed() {
        let (_dir, store) = temp_store();
        store
            .save(&Customer::new("1", "Musterfirma GmbH", "Berlin", "", ""))
            .unwrap();

        assert!(store.contains_name("  musterfirma gmbh ").unwrap());
        assert!(store.contains_name("MUSTERFIRMA GMBH").unwrap());
        assert!(!store.contains_name("Musterfirma").unwrap());
    }
}
