//! CLI command handler for CSV import
//!
//! Handles importing expenses from CSV files with automatic
//! column mapping detection.

use std::path::Path;

use crate::error::{OutlayError, OutlayResult};
use crate::services::{ColumnMapping, ImportService};
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(
    storage: &Storage,
    file: &str,
    date_format: Option<String>,
    no_header: bool,
) -> OutlayResult<()> {
    let import_service = ImportService::new(storage);

    let path = Path::new(file);
    if !path.exists() {
        return Err(OutlayError::Import(format!("File not found: {}", file)));
    }

    // Detect column mapping from the header row
    let mut mapping = if no_header {
        ColumnMapping::new().with_header(false)
    } else {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| OutlayError::Import(format!("Could not open CSV file: {}", e)))?;
        let headers = reader
            .headers()
            .map_err(|e| OutlayError::Import(format!("Could not read CSV header: {}", e)))?;
        import_service.detect_mapping_from_headers(headers)
    };

    if let Some(format) = date_format {
        mapping = mapping.with_date_format(&format);
    }

    let result = import_service.import_file(path, &mapping)?;

    if result.imported == 0 && result.skipped == 0 {
        println!("No expenses found in CSV file.");
        return Ok(());
    }

    println!("Import Complete!");
    println!("  Imported:  {}", result.imported);
    println!("  Skipped:   {}", result.skipped);
    if !result.created_categories.is_empty() {
        println!(
            "  New categories: {}",
            result.created_categories.join(", ")
        );
    }
    if !result.error_messages.is_empty() {
        let mut rows: Vec<_> = result.error_messages.iter().collect();
        rows.sort_by_key(|(row, _)| **row);
        println!();
        println!("Skipped rows:");
        for (row, msg) in rows {
            println!("  Row {}: {}", row + 1, msg);
        }
    }

    Ok(())
}
