//! zecwallet-settings - Node connection settings for a Zcash desktop wallet
//!
//! # Architecture
//!
//! ## Connection Resolution
//! - [`config`] - Connection parameters and their source
//! - [`zcashconf`] - Reader for the node's `zcash.conf`
//! - [`store`] - Persisted UI settings
//! - [`settings`] - Priority resolution and session state
//!
//! ## Display Helpers
//! - [`address`] - Shielded address classification
//! - [`format`] - Balance formatting
//!
//! ## Utilities
//! - [`error`] - Error types
//! - [`logging`] - Tracing setup

#![forbid(unsafe_code)]

// ============================================================================
// Connection Resolution
// ============================================================================
pub mod config;
pub mod settings;
pub mod store;
pub mod zcashconf;

// ============================================================================
// Display Helpers
// ============================================================================
pub mod address;
pub mod format;

// ============================================================================
// Utilities
// ============================================================================
pub mod error;
pub mod logging;

pub use config::{Config, ConfigSource};
pub use error::{Result, SettingsError};
pub use settings::{ConfLocation, Session, Settings};
pub use store::{FileStore, MemoryStore, SettingsStore};
