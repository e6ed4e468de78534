//! Response representations
//!
//! Entities reference each other by id; representers resolve the names and
//! rates clients expect to see next to those ids.

pub mod consultant;
pub mod role;
pub mod task;
pub mod work_entry;

pub use consultant::{ConsultantRepresentation, ConsultantRepresenter};
pub use role::RoleRepresentation;
pub use task::{TaskRepresentation, TaskRepresenter};
pub use work_entry::{
    NameIndex, PaymentSummaryRepresentation, WorkEntryRepresentation, WorkEntryRepresenter,
};
