//! API routes

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::extractors::AppState;
use crate::handlers::{consultants, roles, tasks, work_entries};

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new().nest("/api", api_router())
}

fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/roles", roles_router())
        .nest("/consultants", consultants_router())
        .nest("/tasks", tasks_router())
        .nest("/workentries", work_entries_router())
}

fn roles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(roles::list_roles).post(roles::create_role))
        .route(
            "/:id",
            get(roles::get_role)
                .put(roles::update_role)
                .delete(roles::delete_role),
        )
}

fn consultants_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(consultants::list_consultants).post(consultants::create_consultant),
        )
        .route(
            "/:id",
            get(consultants::get_consultant)
                .put(consultants::update_consultant)
                .delete(consultants::delete_consultant),
        )
}

fn tasks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/:id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/:id/assign", post(tasks::assign_consultant))
        .route(
            "/:id/unassign/:consultant_id",
            delete(tasks::unassign_consultant),
        )
}

fn work_entries_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(work_entries::list_work_entries).post(work_entries::record_work),
        )
        .route(
            "/:id",
            get(work_entries::get_work_entry).delete(work_entries::delete_work_entry),
        )
        .route(
            "/consultant/:id/summary",
            get(work_entries::consultant_summary),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use cm_db::MemoryStorage;
    use cm_services::LedgerServices;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let services = LedgerServices::new(Arc::new(MemoryStorage::seeded()), Decimal::from(12));
        router().with_state(AppState::new(services))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Consultant 1 on role 1 (50.00), assigned to task 1
    async fn seed(app: &Router) {
        let (status, _) = send(
            app,
            "POST",
            "/api/consultants",
            Some(json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "consultantRoleId": 1
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            app,
            "POST",
            "/api/tasks",
            Some(json!({"name": "Audit", "durationHours": 40})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            app,
            "POST",
            "/api/tasks/1/assign",
            Some(json!({"consultantId": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    fn work(hours: &str) -> Value {
        json!({"consultantId": 1, "taskId": 1, "workDate": "2025-01-01", "hoursWorked": hours})
    }

    #[tokio::test]
    async fn test_roles_crud() {
        let app = app();
        let (status, roles) = send(&app, "GET", "/api/roles", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(roles[0], json!({"id": 1, "name": "Consultant Level 1", "ratePerHour": "50.00"}));

        let (status, created) = send(
            &app,
            "POST",
            "/api/roles",
            Some(json!({"name": "Partner", "ratePerHour": 150})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 3);

        let (status, _) = send(
            &app,
            "PUT",
            "/api/roles/3",
            Some(json!({"name": "Partner", "ratePerHour": "160.00"})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, role) = send(&app, "GET", "/api/roles/3", None).await;
        assert_eq!(role["ratePerHour"], "160.00");

        let (status, _) = send(&app, "DELETE", "/api/roles/3", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = send(&app, "GET", "/api/roles/3", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_role_in_use_conflicts() {
        let app = app();
        seed(&app).await;
        let (status, body) = send(&app, "DELETE", "/api/roles/1", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");
    }

    #[tokio::test]
    async fn test_invalid_role_rate() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/roles",
            Some(json!({"name": "Free", "ratePerHour": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_argument");
        assert_eq!(body["message"], "rate_per_hour must be greater than 0");
    }

    #[tokio::test]
    async fn test_consultant_and_task_views() {
        let app = app();
        seed(&app).await;

        let (_, consultant) = send(&app, "GET", "/api/consultants/1", None).await;
        assert_eq!(consultant["consultantRoleName"], "Consultant Level 1");
        assert_eq!(consultant["currentRatePerHour"], "50.00");
        assert_eq!(consultant["profileImagePath"], Value::Null);

        let (_, tasks) = send(&app, "GET", "/api/tasks", None).await;
        assert_eq!(tasks[0]["assignedConsultantIds"], json!([1]));

        let (status, _) = send(
            &app,
            "POST",
            "/api/tasks/1/assign",
            Some(json!({"consultantId": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_record_work_and_summary() {
        let app = app();
        seed(&app).await;

        let (status, entry) = send(&app, "POST", "/api/workentries", Some(work("5"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(entry["consultantName"], "Ada Lovelace");
        assert_eq!(entry["taskName"], "Audit");
        assert_eq!(entry["ratePerHourAtTimeOfWork"], "50.00");

        let (status, body) = send(&app, "POST", "/api/workentries", Some(work("8"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "resource_exhausted");
        assert_eq!(
            body["message"],
            "Cannot exceed 12 hours per day. Already worked 5 hours on 2025-01-01."
        );

        let (status, _) = send(&app, "POST", "/api/workentries", Some(work("7"))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, summary) = send(
            &app,
            "GET",
            "/api/workentries/consultant/1/summary?startDate=2025-01-01&endDate=2025-01-31",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["totalHours"], "12");
        assert_eq!(summary["totalAmount"], "600.00");
        assert_eq!(summary["workEntries"].as_array().unwrap().len(), 2);
        assert_eq!(summary["workEntries"][1]["totalAmount"], "350.00");
    }

    #[tokio::test]
    async fn test_out_of_range_decimals() {
        let app = app();
        seed(&app).await;

        for rate in ["33.335", "0.001", "100000000"] {
            let (status, body) = send(
                &app,
                "PUT",
                "/api/roles/1",
                Some(json!({"name": "Consultant Level 1", "ratePerHour": rate})),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", rate);
            assert_eq!(body["error"], "invalid_argument");
        }

        let (status, body) = send(&app, "POST", "/api/workentries", Some(work("0.001"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "hours_worked must have at most 2 decimal places");

        let (status, _) = send(
            &app,
            "PUT",
            "/api/roles/1",
            Some(json!({"name": "Partner", "ratePerHour": "99999999.99"})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, entry) = send(&app, "POST", "/api/workentries", Some(work("12"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(entry["totalAmount"], "1199999999.88");

        let (status, body) = send(
            &app,
            "POST",
            "/api/workentries",
            Some(work("79228162514264337593543950335")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "resource_exhausted");

        let (status, summary) = send(
            &app,
            "GET",
            "/api/workentries/consultant/1/summary?startDate=2025-01-01&endDate=2025-01-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["totalAmount"], "1199999999.88");
    }

    #[tokio::test]
    async fn test_unassigned_work_is_rejected() {
        let app = app();
        seed(&app).await;

        let (status, _) = send(&app, "DELETE", "/api/tasks/1/unassign/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", "/api/tasks/1/unassign/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "POST", "/api/workentries", Some(work("1"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "failed_precondition");
    }

    #[tokio::test]
    async fn test_summary_rejects_bad_ranges() {
        let app = app();
        seed(&app).await;

        let (status, body) = send(
            &app,
            "GET",
            "/api/workentries/consultant/1/summary?startDate=2025-02-01&endDate=2025-01-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_argument");

        let (status, _) = send(
            &app,
            "GET",
            "/api/workentries/consultant/1/summary?startDate=2025-02-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "GET",
            "/api/workentries/consultant/42/summary?startDate=2025-01-01&endDate=2025-01-31",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/roles")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_entry() {
        let app = app();
        seed(&app).await;
        send(&app, "POST", "/api/workentries", Some(work("2.5"))).await;

        let (status, entry) = send(&app, "GET", "/api/workentries/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(entry["totalAmount"], "125.000");

        let (status, _) = send(&app, "DELETE", "/api/workentries/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "GET", "/api/workentries/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
