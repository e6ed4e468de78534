//! Task representer

use cm_core::traits::Id;
use cm_models::Task;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRepresentation {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub duration_hours: Decimal,
    pub assigned_consultant_ids: Vec<Id>,
}

pub struct TaskRepresenter;

impl TaskRepresenter {
    pub fn represent(task: Task, assigned_consultant_ids: Vec<Id>) -> TaskRepresentation {
        TaskRepresentation {
            id: task.id,
            name: task.name,
            description: task.description,
            duration_hours: task.duration_hours,
            assigned_consultant_ids,
        }
    }
}
