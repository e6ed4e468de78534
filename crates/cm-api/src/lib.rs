//! # cm-api
//!
//! JSON REST handlers for the consultant ledger.
//!
//! Bodies are camelCase, decimals travel as strings and dates as
//! `YYYY-MM-DD`. Errors use `{"error", "message"}` with the status derived
//! from the ledger error kind.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod representers;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;
