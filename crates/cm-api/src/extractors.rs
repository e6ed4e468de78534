//! Axum extractors and shared state for API handlers

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts};
use cm_services::LedgerServices;

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<LedgerServices>,
}

impl AppState {
    pub fn new(services: LedgerServices) -> Self {
        Self {
            services: Arc::new(services),
        }
    }
}

/// JSON body whose rejections use the API error format
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string whose rejections use the API error format
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Path parameters whose rejections use the API error format
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
