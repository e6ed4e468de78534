//! Core error types for the consultant ledger
//!
//! Every failure a caller can observe is one of the [`ErrorKind`]s below.
//! Business-rule kinds are kept distinct from opaque storage failures.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::traits::Id;

/// Core error type for all ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("{entity} with {field}={value} not found")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{message}")]
    FailedPrecondition { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error(
        "Cannot exceed {cap} hours per day. Already worked {logged_hours} hours on {work_date}."
    )]
    DailyCapExceeded {
        consultant_id: Id,
        work_date: NaiveDate,
        logged_hours: Decimal,
        requested_hours: Decimal,
        cap: Decimal,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error taxonomy exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    FailedPrecondition,
    Conflict,
    ResourceExhausted,
    Internal,
}

impl LedgerError {
    pub fn not_found(entity: &'static str, id: Id) -> Self {
        LedgerError::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        LedgerError::Validation(errors)
    }

    pub fn failed_precondition(message: impl Into<String>) -> Self {
        LedgerError::FailedPrecondition {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        LedgerError::Conflict {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::NotFound { .. } => ErrorKind::NotFound,
            LedgerError::Validation(_) => ErrorKind::InvalidArgument,
            LedgerError::FailedPrecondition { .. } => ErrorKind::FailedPrecondition,
            LedgerError::Conflict { .. } => ErrorKind::Conflict,
            LedgerError::DailyCapExceeded { .. } => ErrorKind::ResourceExhausted,
            LedgerError::Database(_) | LedgerError::Internal(_) | LedgerError::Config(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// HTTP status code mapping
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::NotFound => 404,
            ErrorKind::InvalidArgument
            | ErrorKind::FailedPrecondition
            | ErrorKind::ResourceExhausted => 400,
            ErrorKind::Conflict => 409,
            ErrorKind::Internal => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            LedgerError::NotFound { .. } => "not_found",
            LedgerError::Validation(_) => "invalid_argument",
            LedgerError::FailedPrecondition { .. } => "failed_precondition",
            LedgerError::Conflict { .. } => "conflict",
            LedgerError::DailyCapExceeded { .. } => "resource_exhausted",
            LedgerError::Database(_) => "database_error",
            LedgerError::Internal(_) => "internal_error",
            LedgerError::Config(_) => "configuration_error",
        }
    }
}

/// Validation errors collection
///
/// Field names are kept sorted so messages are stable across runs.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: BTreeMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }

    /// Turn a non-empty collection into an `Err`
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}
