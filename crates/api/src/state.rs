use std::sync::Arc;

use crate::{config::Config, services::EmailSender, stores::Stores};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Ephemeral stores (in-memory).
    pub stores: Stores,
    /// Email sender.
    pub email: Arc<dyn EmailSender>,
}
