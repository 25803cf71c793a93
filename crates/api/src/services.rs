//! External service abstractions.
//!
//! Each external service the API depends on is abstracted behind a trait to
//! enable mocking in tests.
//!
//! ## Services
//!
//! - **email** - Transactional email via Resend (prod) or SMTP (dev)
//!
//! ## Usage in Handlers
//!
//! Services are accessed via `AppState`:
//!
//! ```ignore
//! async fn handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
//!     state.email.send_verification_code(&email, &code).await?;
//! }
//! ```

mod email;

pub use email::{EmailSender, EmailSenderImpl};

#[cfg(test)]
pub use email::MockEmailSender;
