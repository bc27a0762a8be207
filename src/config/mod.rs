//! Configuration module for Outlay
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - Application preferences

pub mod paths;
pub mod settings;

pub use paths::OutlayPaths;
pub use settings::Settings;
