//! Recurring expense repository for JSON storage
//!
//! Manages loading and saving recurring definitions to recurring.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::OutlayError;
use crate::models::{RecurringExpense, RecurringId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable recurring data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RecurringData {
    recurring: Vec<RecurringExpense>,
}

/// Repository for recurring definition persistence
pub struct RecurringRepository {
    path: PathBuf,
    data: RwLock<HashMap<RecurringId, RecurringExpense>>,
}

impl RecurringRepository {
    /// Create a new recurring repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load definitions from disk
    pub fn load(&self) -> Result<(), OutlayError> {
        let file_data: RecurringData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for def in file_data.recurring {
            data.insert(def.id, def);
        }

        Ok(())
    }

    /// Save definitions to disk
    pub fn save(&self) -> Result<(), OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut recurring: Vec<_> = data.values().cloned().collect();
        recurring.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let file_data = RecurringData { recurring };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a definition by ID
    pub fn get(&self, id: RecurringId) -> Result<Option<RecurringExpense>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all definitions in creation order
    pub fn get_all(&self) -> Result<Vec<RecurringExpense>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut recurring: Vec<_> = data.values().cloned().collect();
        recurring.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(recurring)
    }

    /// Get a definition by title (case-insensitive)
    pub fn get_by_title(&self, title: &str) -> Result<Option<RecurringExpense>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|r| r.title.eq_ignore_ascii_case(title))
            .cloned())
    }

    /// Insert or update a definition
    pub fn upsert(&self, def: RecurringExpense) -> Result<(), OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(def.id, def);
        Ok(())
    }

    /// Delete a definition
    pub fn delete(&self, id: RecurringId) -> Result<bool, OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count definitions
    pub fn count(&self) -> Result<usize, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
