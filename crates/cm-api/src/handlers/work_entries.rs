//! Work entry and payment summary API handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDate;
use cm_core::result::LedgerResult;
use cm_core::traits::Id;
use cm_models::WorkEntryParams;
use serde::Deserialize;

use super::created;
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, AppState};
use crate::representers::{
    NameIndex, PaymentSummaryRepresentation, WorkEntryRepresentation, WorkEntryRepresenter,
};

/// `?startDate=YYYY-MM-DD&endDate=YYYY-MM-DD`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// GET /api/workentries
pub async fn list_work_entries(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<WorkEntryRepresentation>>> {
    let entries = state.services.ledger.list_entries().await?;
    let names = NameIndex::load(&state.services).await?;
    let representations = entries
        .into_iter()
        .map(|e| WorkEntryRepresenter::represent(e, &names))
        .collect::<LedgerResult<Vec<_>>>()?;
    Ok(Json(representations))
}

/// GET /api/workentries/:id
pub async fn get_work_entry(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<Json<WorkEntryRepresentation>> {
    let entry = state.services.ledger.get_entry(id).await?;
    let names = NameIndex::for_entry(&state.services, &entry).await?;
    Ok(Json(WorkEntryRepresenter::represent(entry, &names)?))
}

/// POST /api/workentries
pub async fn record_work(
    State(state): State<AppState>,
    ApiJson(params): ApiJson<WorkEntryParams>,
) -> ApiResult<impl IntoResponse> {
    let entry = state.services.ledger.record_work(params).await?;
    let names = NameIndex::for_entry(&state.services, &entry).await?;
    let location = format!("/api/workentries/{}", entry.id);
    Ok(created(location, WorkEntryRepresenter::represent(entry, &names)?))
}

/// DELETE /api/workentries/:id
pub async fn delete_work_entry(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<StatusCode> {
    state.services.ledger.delete_entry(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/workentries/consultant/:id/summary
pub async fn consultant_summary(
    State(state): State<AppState>,
    ApiPath(consultant_id): ApiPath<Id>,
    ApiQuery(query): ApiQuery<SummaryQuery>,
) -> ApiResult<Json<PaymentSummaryRepresentation>> {
    let summary = state
        .services
        .summaries
        .summarize(consultant_id, query.start_date, query.end_date)
        .await?;
    let names = NameIndex::load(&state.services).await?;
    Ok(Json(WorkEntryRepresenter::represent_summary(summary, &names)?))
}
