//! # cm-core
//!
//! Core types, traits, and utilities for the consultant ledger.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - The error taxonomy (`LedgerError`, `ErrorKind`, `ValidationErrors`)
//! - Result type aliases
//! - Core traits (Entity, Identifiable, Timestamped)
//! - Decimal helpers and date ranges
//! - Configuration types

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::*;
pub use result::*;
pub use traits::*;
pub use types::*;
