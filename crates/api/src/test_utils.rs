//! Shared test utilities for API handler tests.
//!
//! Provides a `test_config()` and a `TestStateBuilder` for constructing
//! `AppState` instances with only the mocks each test needs.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::test_utils::TestStateBuilder;
//!
//! let mut store = MockVerificationStore::new();
//! store.expect_consume().returning(|_, _| Ok(ConsumeOutcome::NotFound));
//!
//! let state = TestStateBuilder::new()
//!     .with_verification_store(store)
//!     .build();
//! ```

use std::sync::Arc;

use crate::config::Config;
use crate::services::MockEmailSender;
use crate::state::AppState;
use crate::stores::{MockVerificationStore, Stores};

/// Creates a test configuration with dummy values.
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 3000,
        smtp_url: None,
        resend_api_key: None,
        env: "test".to_string(),
        sentry_dsn: None,
    }
}

/// Builder for constructing test `AppState` with custom mocks.
///
/// Uses default (empty) mocks for any store/service not explicitly set, so
/// tests only configure the collaborators they actually exercise.
pub struct TestStateBuilder {
    verification_store: Option<MockVerificationStore>,
    email_sender: Option<MockEmailSender>,
}

impl TestStateBuilder {
    /// Creates a new builder with no mocks configured.
    pub fn new() -> Self {
        Self {
            verification_store: None,
            email_sender: None,
        }
    }

    pub fn with_verification_store(mut self, store: MockVerificationStore) -> Self {
        self.verification_store = Some(store);
        self
    }

    pub fn with_email_sender(mut self, sender: MockEmailSender) -> Self {
        self.email_sender = Some(sender);
        self
    }

    /// Builds the `AppState` using configured mocks or defaults.
    pub fn build(self) -> AppState {
        let stores = Stores {
            verification: Arc::new(
                self.verification_store
                    .unwrap_or_else(MockVerificationStore::new),
            ),
        };

        let email = Arc::new(self.email_sender.unwrap_or_else(MockEmailSender::new))
            as Arc<dyn crate::services::EmailSender>;

        AppState {
            config: test_config(),
            stores,
            email,
        }
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
