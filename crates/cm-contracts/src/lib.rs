//! # cm-contracts
//!
//! Contract validation for the consultant ledger.
//!
//! Contracts validate caller-supplied attributes before create/update
//! operations. Failures surface as `InvalidArgument`.

pub mod base;
pub mod consultants;
pub mod roles;
pub mod tasks;
pub mod work_entries;

pub use base::*;
pub use consultants::ConsultantContract;
pub use roles::RoleContract;
pub use tasks::TaskContract;
pub use work_entries::WorkEntryContract;
