//! Email verification flow.
//!
//! Flow:
//! 1. User requests a code via POST /auth/code with their email
//! 2. A 6-digit code is generated and stored in memory keyed by the
//!    normalized email, replacing any earlier code for that address
//! 3. The plaintext code is emailed to the user
//! 4. User submits email + code to POST /auth/verify
//! 5. The code is matched and consumed atomically; codes are single-use
//!    and expire after 10 minutes
//!
//! Notes:
//! - Emails are trimmed and lower-cased before use, so address comparison is
//!   case-insensitive; codes are trimmed but compared case-sensitively
//! - A wrong code does not invalidate the stored one, so a typo can be
//!   corrected within the TTL
//! - Issuance sweeps expired codes from the store before writing a new one
//! - Rate limiting should be handled by a reverse proxy (Caddy, Kong, etc.)

use axum::{
    Json, Router, debug_handler,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use garde::Validate;
use rand::Rng;
use shared::api::{
    RequestCodePayload, RequestCodeResponse, VerifyCodePayload, VerifyCodeResponse,
};

use crate::{
    error::AppError,
    state::AppState,
    stores::{ConsumeOutcome, VerifyState},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/code", post(request_code))
        .route("/verify", post(verify_code))
}

#[debug_handler]
async fn request_code(
    State(state): State<AppState>,
    Json(payload): Json<RequestCodePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let email = payload.email.trim().to_lowercase();

    // Opportunistic sweep; nothing else is scheduled to run cleanup
    let removed = state.stores.verification.cleanup().await?;
    if removed > 0 {
        tracing::debug!(removed, "swept expired verification codes");
    }

    let code: String = {
        let mut rng = rand::rng();
        (0..6)
            .map(|_| rng.random_range(0..10).to_string())
            .collect()
    };

    state
        .stores
        .verification
        .set(
            &email,
            VerifyState {
                code: code.clone(),
                created_at: Utc::now().timestamp(),
                // Populated by the account flow after verification
                username: String::new(),
            },
        )
        .await?;

    state.email.send_verification_code(&email, &code).await?;

    let pending = state.stores.verification.size().await?;
    tracing::info!(email = %email, pending, "verification code issued");

    Ok(Json(RequestCodeResponse {
        success: true,
        message: "Verification code sent to your email".to_string(),
    }))
}

#[debug_handler]
async fn verify_code(
    State(state): State<AppState>,
    Json(payload): Json<VerifyCodePayload>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload.email.trim().to_lowercase();
    let code = payload.code.trim();

    if email.is_empty() || code.is_empty() {
        return Err(AppError::Validation(
            "Email and code are required".to_string(),
        ));
    }

    match state.stores.verification.consume(&email, code).await? {
        ConsumeOutcome::NotFound => {
            tracing::warn!(email = %email, "verification failed: no pending code");
            Err(AppError::External(
                StatusCode::BAD_REQUEST,
                "Invalid or expired verification code",
            ))
        }
        ConsumeOutcome::Mismatch => {
            tracing::warn!(email = %email, "verification failed: code mismatch");
            Err(AppError::External(
                StatusCode::BAD_REQUEST,
                "Invalid verification code",
            ))
        }
        ConsumeOutcome::Expired => {
            tracing::warn!(email = %email, "verification failed: code expired");
            Err(AppError::External(
                StatusCode::BAD_REQUEST,
                "Verification code has expired",
            ))
        }
        ConsumeOutcome::Verified(_) => {
            tracing::info!(email = %email, "email verified");
            Ok(Json(VerifyCodeResponse {
                success: true,
                message: "Email verified successfully".to_string(),
                email,
            }))
        }
    }
}
