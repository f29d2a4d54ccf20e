//! Health check endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint (checks database connectivity)
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse),
        (status = 500, description = "Database unreachable", body = crate::error::ErrorResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<crate::AppState>,
) -> AppResult<Json<HealthResponse>> {
    state.services.equipment.ping().await?;
    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{body::Body, http::{Request, StatusCode}};
    use tower::ServiceExt;

    use crate::{
        api::create_router, config::AppConfig, repository::equipment::MockEquipmentStore,
        services::Services, AppState,
    };

    fn state(store: MockEquipmentStore) -> AppState {
        AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(Services::with_equipment_store(Arc::new(store))),
        }
    }

    async fn get_status(store: MockEquipmentStore, uri: &str) -> StatusCode {
        create_router(state(store))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_does_not_touch_store() {
        let mut store = MockEquipmentStore::new();
        store.expect_ping().never();

        assert_eq!(get_status(store, "/api/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_when_store_answers() {
        let mut store = MockEquipmentStore::new();
        store.expect_ping().times(1).returning(|| Ok(()));

        assert_eq!(get_status(store, "/api/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_not_ready_when_store_is_down() {
        let mut store = MockEquipmentStore::new();
        store
            .expect_ping()
            .returning(|| Err(sqlx::Error::PoolTimedOut.into()));

        assert_eq!(
            get_status(store, "/api/ready").await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
