//! Task assignment model
//!
//! Table: task_assignments (unique on consultant_id, task_id)

use chrono::{DateTime, Utc};
use cm_core::traits::{ConsultantScoped, Id, Identifiable};
use serde::{Deserialize, Serialize};

/// Authorization for a consultant to log work against a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Id,
    pub consultant_id: Id,
    pub task_id: Id,
    pub assigned_at: DateTime<Utc>,
}

impl Identifiable for Assignment {
    fn id(&self) -> Id {
        self.id
    }
}

impl ConsultantScoped for Assignment {
    fn consultant_id(&self) -> Id {
        self.consultant_id
    }
}

/// Request body for `POST /tasks/:task_id/assign`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignConsultant {
    pub consultant_id: Id,
}
