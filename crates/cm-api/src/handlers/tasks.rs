//! Task and assignment API handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cm_core::traits::Id;
use cm_models::{AssignConsultant, Task, TaskParams};

use super::created;
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, AppState};
use crate::representers::{TaskRepresentation, TaskRepresenter};

async fn represent(state: &AppState, task: Task) -> ApiResult<TaskRepresentation> {
    let assigned = state.services.assignments.consultants_for_task(task.id).await?;
    Ok(TaskRepresenter::represent(task, assigned))
}

/// GET /api/tasks
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskRepresentation>>> {
    let tasks = state.services.tasks.list().await?;
    let mut representations = Vec::with_capacity(tasks.len());
    for task in tasks {
        representations.push(represent(&state, task).await?);
    }
    Ok(Json(representations))
}

/// GET /api/tasks/:id
pub async fn get_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<Json<TaskRepresentation>> {
    let task = state.services.tasks.get(id).await?;
    Ok(Json(represent(&state, task).await?))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    ApiJson(params): ApiJson<TaskParams>,
) -> ApiResult<impl IntoResponse> {
    let task = state.services.tasks.create(params).await?;
    let location = format!("/api/tasks/{}", task.id);
    Ok(created(location, TaskRepresenter::represent(task, Vec::new())))
}

/// PUT /api/tasks/:id
pub async fn update_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
    ApiJson(params): ApiJson<TaskParams>,
) -> ApiResult<StatusCode> {
    state.services.tasks.update(id, params).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<StatusCode> {
    state.services.tasks.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/tasks/:id/assign
pub async fn assign_consultant(
    State(state): State<AppState>,
    ApiPath(task_id): ApiPath<Id>,
    ApiJson(body): ApiJson<AssignConsultant>,
) -> ApiResult<impl IntoResponse> {
    let assignment = state
        .services
        .assignments
        .assign(body.consultant_id, task_id)
        .await?;
    Ok(created(format!("/api/tasks/{}", task_id), assignment))
}

/// DELETE /api/tasks/:id/unassign/:consultant_id
pub async fn unassign_consultant(
    State(state): State<AppState>,
    ApiPath((task_id, consultant_id)): ApiPath<(Id, Id)>,
) -> ApiResult<StatusCode> {
    state
        .services
        .assignments
        .unassign(consultant_id, task_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
