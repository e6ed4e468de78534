//! Result type aliases

use crate::error::LedgerError;

/// Standard Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
