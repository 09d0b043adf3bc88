//! # MixMuse Shared
//!
//! Shared types, errors, and configuration records for MixMuse.
//! This crate provides the foundation types used across all MixMuse components.

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use crate::config::*;
pub use crate::error::*;
pub use crate::types::*;

/// Version information for MixMuse.rs
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
