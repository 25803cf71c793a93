//! Ephemeral stores (in-memory).
//!
//! This module contains traits and implementations for ephemeral data
//! storage. Everything here lives for the process lifetime only and is lost
//! on restart.
//!
//! ## Stores
//!
//! - **verification** - Email verification codes (10 min TTL), keyed by
//!   normalized email
//!
//! ## Usage in Handlers
//!
//! Stores are accessed via `state.stores`:
//!
//! ```ignore
//! async fn handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
//!     state.stores.verification.set(&email, state).await?;
//!     let outcome = state.stores.verification.consume(&email, &code).await?;
//! }
//! ```

mod verification;

pub use verification::{
    CODE_TTL_SECS, ConsumeOutcome, MemoryVerificationStore, VerificationStore, VerifyState,
};

#[cfg(test)]
pub use verification::MockVerificationStore;

use std::sync::Arc;

/// Collection of all ephemeral stores.
#[derive(Clone)]
pub struct Stores {
    pub verification: Arc<dyn VerificationStore>,
}
