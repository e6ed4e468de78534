//! # cm-models
//!
//! Domain models for the consultant ledger.
//!
//! Entities are flat records keyed by [`Id`]; relations are plain id fields
//! resolved by explicit lookup in the stores.

pub use cm_core::traits::{ConsultantScoped, Entity, Id, Identifiable, Timestamped};

pub mod assignment;
pub mod consultant;
pub mod role;
pub mod summary;
pub mod task;
pub mod work_entry;

pub use assignment::{AssignConsultant, Assignment};
pub use consultant::{Consultant, ConsultantParams};
pub use role::{Role, RoleParams};
pub use summary::PaymentSummary;
pub use task::{Task, TaskParams};
pub use work_entry::{NewWorkEntry, WorkEntry, WorkEntryParams};
