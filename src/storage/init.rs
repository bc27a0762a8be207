//! Storage initialization
//!
//! Handles first-run setup and default data creation

use crate::config::paths::OutlayPaths;
use crate::error::OutlayError;
use crate::models::default_categories;

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Creates the data directories and a starter category set
pub fn initialize_storage(paths: &OutlayPaths) -> Result<(), OutlayError> {
    // Ensure all directories exist
    paths.ensure_directories()?;

    // Seed starter categories if categories.json doesn't exist
    if !paths.categories_file().exists() {
        let data = CategoryData {
            categories: default_categories(),
        };
        write_json_atomic(paths.categories_file(), &data)?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &OutlayPaths) -> bool {
    !paths.categories_file().exists()
}
