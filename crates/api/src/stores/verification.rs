//! In-memory verification code storage.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

/// Verification codes expire 10 minutes after issuance.
pub const CODE_TTL_SECS: i64 = 10 * 60;

/// State stored for a pending verification code, keyed by normalized email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyState {
    pub code: String,
    pub created_at: i64,
    /// Filled in by the account flow after verification; carried through
    /// untouched here.
    pub username: String,
}

/// Outcome of an atomic code consumption attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// Code matched within its TTL. The record has been removed, so the code
    /// cannot be used a second time.
    Verified(VerifyState),
    /// No record for this email.
    NotFound,
    /// A record exists but the code differs. The record is kept, so the user
    /// can retry with the correct code while it is still valid.
    Mismatch,
    /// The record outlived its TTL and has been removed.
    Expired,
}

/// Store for verification code operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Insert or replace the pending code for an email.
    async fn set(&self, email: &str, state: VerifyState) -> Result<()>;

    /// Get the pending code for an email. Does not enforce the TTL.
    async fn get(&self, email: &str) -> Result<Option<VerifyState>>;

    /// Remove the pending code for an email. Returns whether one was present.
    async fn delete(&self, email: &str) -> Result<bool>;

    /// Look up, compare and (on success or expiry) remove the code for an
    /// email as a single atomic step, so a valid code is consumed by exactly
    /// one caller.
    async fn consume(&self, email: &str, code: &str) -> Result<ConsumeOutcome>;

    /// Remove all entries older than the TTL. Returns how many were removed.
    async fn cleanup(&self) -> Result<usize>;

    /// Current entry count, for diagnostics.
    async fn size(&self) -> Result<usize>;
}

/// In-memory implementation of VerificationStore.
///
/// Entries live until consumed, swept by `cleanup`, or the process exits.
/// Codes are lost on restart; a deployment that needs durability should swap
/// this for a TTL-capable external store behind the same trait.
#[derive(Default)]
pub struct MemoryVerificationStore {
    entries: Mutex<HashMap<String, VerifyState>>,
}

impl MemoryVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, VerifyState>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("verification store lock poisoned"))
    }
}

#[async_trait]
impl VerificationStore for MemoryVerificationStore {
    async fn set(&self, email: &str, state: VerifyState) -> Result<()> {
        self.entries()?.insert(email.to_string(), state);
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<VerifyState>> {
        Ok(self.entries()?.get(email).cloned())
    }

    async fn delete(&self, email: &str) -> Result<bool> {
        Ok(self.entries()?.remove(email).is_some())
    }

    async fn consume(&self, email: &str, code: &str) -> Result<ConsumeOutcome> {
        let mut entries = self.entries()?;

        let Entry::Occupied(entry) = entries.entry(email.to_string()) else {
            return Ok(ConsumeOutcome::NotFound);
        };

        // Wrong code keeps the record; only a full match may consume it.
        if entry.get().code != code {
            return Ok(ConsumeOutcome::Mismatch);
        }

        let age = Utc::now().timestamp() - entry.get().created_at;
        if age > CODE_TTL_SECS {
            entry.remove();
            return Ok(ConsumeOutcome::Expired);
        }

        Ok(ConsumeOutcome::Verified(entry.remove()))
    }

    async fn cleanup(&self) -> Result<usize> {
        let mut entries = self.entries()?;
        let now = Utc::now().timestamp();

        let before = entries.len();
        entries.retain(|_, state| now - state.created_at <= CODE_TTL_SECS);

        Ok(before - entries.len())
    }

    async fn size(&self) -> Result<usize> {
        Ok(self.entries()?.len())
    }
}
