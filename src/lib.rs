//! # Gridsense - real-time electricity price signals for home automation
//!
//! Gridsense polls a retail energy provider's insights API for real-time
//! wholesale electricity prices and derives a small set of normalized
//! signals (price level, relative intensity, high/low flags) that hosting
//! integrations publish to smart-home platforms.
//!
//! ## Architecture
//!
//! The crate follows a modular architecture with clear separation of concerns:
//!
//! - `config`: Configuration management and validation
//! - `logging`: Structured logging and tracing
//! - `griddy`: Pricing API data model and fetcher
//! - `signals`: Pure derived-signal computations
//! - `publish`: Signal sink seam towards the hosting integration
//! - `monitor`: Poll loop and refresh scheduling

pub mod config;
pub mod error;
pub mod griddy;
pub mod logging;
pub mod monitor;
pub mod publish;
pub mod signals;

// Re-export commonly used types
pub use config::Config;
pub use error::{GridsenseError, Result};
pub use monitor::PriceMonitor;
