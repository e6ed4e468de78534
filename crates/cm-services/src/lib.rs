//! # cm-services
//!
//! Business logic for the consultant ledger.
//!
//! Registries for roles, consultants, tasks and assignments, the work
//! ledger that admits entries, and the payment summarizer. Every service
//! works against `Arc<dyn Storage>` and returns `LedgerResult`.

pub mod assignments;
pub mod base;
pub mod consultants;
pub mod ledger;
pub mod locks;
pub mod roles;
pub mod summaries;
pub mod tasks;

use std::sync::Arc;

use cm_db::Storage;
use rust_decimal::Decimal;

pub use assignments::AssignmentService;
pub use base::SharedStorage;
pub use consultants::ConsultantService;
pub use ledger::WorkLedger;
pub use locks::DailyLocks;
pub use roles::RoleService;
pub use summaries::PaymentSummarizer;
pub use tasks::TaskService;

/// Every service wired to one storage backend
#[derive(Clone)]
pub struct LedgerServices {
    pub roles: RoleService,
    pub consultants: ConsultantService,
    pub tasks: TaskService,
    pub assignments: AssignmentService,
    pub ledger: WorkLedger,
    pub summaries: PaymentSummarizer,
    storage: SharedStorage,
}

impl LedgerServices {
    pub fn new(storage: Arc<dyn Storage>, daily_hour_cap: Decimal) -> Self {
        Self {
            roles: RoleService::new(storage.clone()),
            consultants: ConsultantService::new(storage.clone()),
            tasks: TaskService::new(storage.clone()),
            assignments: AssignmentService::new(storage.clone()),
            ledger: WorkLedger::with_cap(storage.clone(), daily_hour_cap),
            summaries: PaymentSummarizer::new(storage.clone()),
            storage,
        }
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }
}
