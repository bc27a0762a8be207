//! Outlay - Terminal-based personal expense tracker
//!
//! This library provides the core functionality for the Outlay expense
//! tracker. It keeps expenses, categories, upcoming bills, and savings
//! goals in plain local JSON files and turns them into dashboards,
//! trends, and forecasts for the terminal.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, categories, bills, goals)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: Pure reporting computations and their rendering
//! - `display`: Terminal formatting for entity listings
//! - `export`: CSV, JSON, and YAML export
//! - `cli`: Command handlers bridging clap to the services
//!
//! # Example
//!
//! ```rust,ignore
//! use outlay::config::{paths::OutlayPaths, settings::Settings};
//!
//! let paths = OutlayPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::OutlayError;
