//! Health check endpoint for load balancers and monitoring.
//!
//! The service has no external storage, so health is simply "the process is
//! serving requests". The pending code count is included as a diagnostic.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use serde::Serialize;

use crate::{error::AppError, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    /// Verification codes currently held in memory.
    pending_codes: usize,
}

async fn health_check(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let pending_codes = state.stores.verification.size().await?;

    Ok(Json(HealthResponse {
        status: "ok",
        pending_codes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::MockVerificationStore;
    use crate::test_utils::TestStateBuilder;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn health_reports_ok_with_pending_count() {
        let mut store = MockVerificationStore::new();
        store.expect_size().returning(|| Ok(3));

        let state = TestStateBuilder::new()
            .with_verification_store(store)
            .build();

        let response = health_check(State(state)).await.unwrap().into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
