//! Profile storage contract.

use std::sync::RwLock;

use async_trait::async_trait;
use bookstore_core::error::DomainError;
use tracing::debug;

use crate::profile::Profile;

/// Holds the current shopper profile.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Returns the current profile.
    async fn get(&self) -> Result<Profile, DomainError>;

    /// Replaces the current profile.
    async fn set(&self, profile: Profile) -> Result<(), DomainError>;
}

/// Profile store kept in process memory; starts with a blank profile.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    current: RwLock<Profile>,
}

impl InMemoryProfileStore {
    /// Creates a store holding a blank profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(e: &std::sync::PoisonError<T>) -> DomainError {
    DomainError::Infrastructure(format!("profile store lock poisoned: {e}"))
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self) -> Result<Profile, DomainError> {
        let current = self.current.read().map_err(|e| poisoned(&e))?;
        Ok(current.clone())
    }

    async fn set(&self, profile: Profile) -> Result<(), DomainError> {
        let mut current = self.current.write().map_err(|e| poisoned(&e))?;
        *current = profile;
        debug!("profile replaced");
        Ok(())
    }
}
