//! CSV import service
//!
//! Provides functionality for importing expenses from CSV files,
//! including column mapping, date parsing, and category resolution.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{OutlayError, OutlayResult};
use crate::models::{Category, CategoryId, Expense, Money, CATEGORY_PALETTE};
use crate::storage::Storage;
use csv::{Reader, StringRecord};

/// Column mapping configuration for CSV import
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Index of the date column
    pub date_column: usize,
    /// Index of the title/description column
    pub title_column: usize,
    /// Index of the amount column
    pub amount_column: usize,
    /// Index of the category name column
    pub category_column: Option<usize>,
    /// Index of the notes column
    pub notes_column: Option<usize>,
    /// Date format string (e.g., "%Y-%m-%d", "%m/%d/%Y")
    pub date_format: String,
    /// Whether the first row is a header
    pub has_header: bool,
    /// Delimiter character
    pub delimiter: char,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date_column: 0,
            title_column: 1,
            amount_column: 2,
            category_column: Some(3),
            notes_column: None,
            date_format: "%Y-%m-%d".to_string(),
            has_header: true,
            delimiter: ',',
        }
    }
}

impl ColumnMapping {
    /// Create a new column mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the date format
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Set whether first row is header
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set the delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// A parsed row from the CSV before import
#[derive(Debug, Clone)]
struct ParsedExpense {
    date: NaiveDate,
    title: String,
    amount: Money,
    category: Option<String>,
    notes: String,
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Number of expenses imported
    pub imported: usize,
    /// Number of rows skipped
    pub skipped: usize,
    /// Names of categories created during the import
    pub created_categories: Vec<String>,
    /// Skip reasons by row number (0-indexed, excluding header)
    pub error_messages: HashMap<usize, String>,
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import expenses from a CSV file
    pub fn import_file(&self, path: &Path, mapping: &ColumnMapping) -> OutlayResult<ImportResult> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(mapping.has_header)
            .delimiter(mapping.delimiter as u8)
            .flexible(true)
            .from_path(path)
            .map_err(|e| OutlayError::Import(format!("Could not open CSV file: {}", e)))?;

        self.import_from_reader(&mut reader, mapping)
    }

    /// Import expenses from a CSV reader
    ///
    /// Rows that fail to parse are skipped and counted; the rest of the
    /// file is still imported.
    pub fn import_from_reader<R: std::io::Read>(
        &self,
        reader: &mut Reader<R>,
        mapping: &ColumnMapping,
    ) -> OutlayResult<ImportResult> {
        let mut result = ImportResult::default();

        for (idx, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    result.skipped += 1;
                    result
                        .error_messages
                        .insert(idx, format!("Error reading CSV record: {}", e));
                    continue;
                }
            };

            let parsed = match self.parse_record(&record, mapping) {
                Ok(parsed) => parsed,
                Err(e) => {
                    result.skipped += 1;
                    result.error_messages.insert(idx, e);
                    continue;
                }
            };

            let category_id = match parsed.category {
                Some(name) => Some(self.resolve_category(&name, &mut result)?),
                None => None,
            };

            let mut expense = Expense::new(&parsed.title, parsed.amount, parsed.date);
            expense.category_id = category_id;
            expense.notes = parsed.notes;

            if let Err(e) = expense.validate() {
                result.skipped += 1;
                result.error_messages.insert(idx, e.to_string());
                continue;
            }

            self.storage.expenses.upsert(expense)?;
            result.imported += 1;
        }

        if result.imported > 0 {
            self.storage.expenses.save()?;
        }
        if !result.created_categories.is_empty() {
            self.storage.categories.save()?;
        }

        Ok(result)
    }

    /// Detect column mapping from CSV header record
    pub fn detect_mapping_from_headers(&self, headers: &StringRecord) -> ColumnMapping {
        let mut mapping = ColumnMapping::new();
        mapping.category_column = None;

        for (idx, header) in headers.iter().enumerate() {
            let h = header.to_lowercase();
            let h = h.trim();

            if h.contains("date") {
                mapping.date_column = idx;
            } else if h.contains("amount") || h.contains("price") || h.contains("cost") {
                mapping.amount_column = idx;
            } else if h.contains("title") || h.contains("description") || h.contains("merchant") {
                mapping.title_column = idx;
            } else if h.contains("category") {
                mapping.category_column = Some(idx);
            } else if h.contains("memo") || h.contains("note") {
                mapping.notes_column = Some(idx);
            }
        }

        mapping
    }

    /// Parse a single CSV record
    fn parse_record(
        &self,
        record: &StringRecord,
        mapping: &ColumnMapping,
    ) -> Result<ParsedExpense, String> {
        let date_str = record
            .get(mapping.date_column)
            .ok_or_else(|| "Missing date column".to_string())?
            .trim();
        let date = self.parse_date(date_str, &mapping.date_format)?;

        let title = record
            .get(mapping.title_column)
            .ok_or_else(|| "Missing title column".to_string())?
            .trim()
            .to_string();

        let amount_str = record
            .get(mapping.amount_column)
            .ok_or_else(|| "Missing amount column".to_string())?
            .trim();
        let amount = self.parse_amount_string(amount_str)?;

        let category = mapping
            .category_column
            .and_then(|col| record.get(col))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let notes = mapping
            .notes_column
            .and_then(|col| record.get(col))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        Ok(ParsedExpense {
            date,
            title,
            amount,
            category,
            notes,
        })
    }

    /// Parse a date string using multiple format attempts
    fn parse_date(&self, s: &str, primary_format: &str) -> Result<NaiveDate, String> {
        // Try primary format first
        if let Ok(date) = NaiveDate::parse_from_str(s, primary_format) {
            return Ok(date);
        }

        // Try common alternative formats
        let formats = [
            "%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%d/%m/%y", "%Y/%m/%d", "%m-%d-%Y",
            "%d-%m-%Y",
        ];

        for format in formats {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Ok(date);
            }
        }

        Err(format!("Could not parse date: '{}'", s))
    }

    /// Parse an amount string, handling currency symbols and commas
    fn parse_amount_string(&self, s: &str) -> Result<Money, String> {
        let cleaned: String = s
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();

        let amount =
            Money::parse(&cleaned).map_err(|e| format!("Could not parse amount '{}': {}", s, e))?;

        if amount.cents() < 0 {
            return Err(format!("Negative amount '{}' is not an expense", s));
        }

        Ok(amount)
    }

    /// Resolve a category name to an ID, creating the category if needed
    fn resolve_category(
        &self,
        name: &str,
        result: &mut ImportResult,
    ) -> OutlayResult<CategoryId> {
        if let Some(existing) = self.storage.categories.get_by_name(name)? {
            return Ok(existing.id);
        }

        let count = self.storage.categories.count()?;
        let color = CATEGORY_PALETTE[count % CATEGORY_PALETTE.len()];
        let category = Category::new(name, color);
        let id = category.id;

        self.storage.categories.upsert(category)?;
        result.created_categories.push(name.to_string());

        Ok(id)
    }
}
