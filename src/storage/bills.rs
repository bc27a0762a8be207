//! Bill repository for JSON storage
//!
//! Manages loading and saving bills to bills.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::OutlayError;
use crate::models::{Bill, BillId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable bill data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BillData {
    bills: Vec<Bill>,
}

/// Repository for bill persistence
pub struct BillRepository {
    path: PathBuf,
    data: RwLock<HashMap<BillId, Bill>>,
}

impl BillRepository {
    /// Create a new bill repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load bills from disk
    pub fn load(&self) -> Result<(), OutlayError> {
        let file_data: BillData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for bill in file_data.bills {
            data.insert(bill.id, bill);
        }

        Ok(())
    }

    /// Save bills to disk
    pub fn save(&self) -> Result<(), OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut bills: Vec<_> = data.values().cloned().collect();
        bills.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.created_at.cmp(&b.created_at)));

        let file_data = BillData { bills };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a bill by ID
    pub fn get(&self, id: BillId) -> Result<Option<Bill>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all bills sorted by due date (soonest first)
    pub fn get_all(&self) -> Result<Vec<Bill>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut bills: Vec<_> = data.values().cloned().collect();
        bills.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.created_at.cmp(&b.created_at)));
        Ok(bills)
    }

    /// Get a bill by title (case-insensitive)
    pub fn get_by_title(&self, title: &str) -> Result<Option<Bill>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|b| b.title.eq_ignore_ascii_case(title))
            .cloned())
    }

    /// Insert or update a bill
    pub fn upsert(&self, bill: Bill) -> Result<(), OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(bill.id, bill);
        Ok(())
    }

    /// Delete a bill
    pub fn delete(&self, id: BillId) -> Result<bool, OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count bills
    pub fn count(&self) -> Result<usize, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
