//! Requesting users: the persistence seam and identity resolution.
//!
//! [`UserStore`] is the collaborator that owns [`UserLocation`] records.
//! It distinguishes a store that cannot answer at all
//! ([`WeatherError::PersistenceUnavailable`]) from one that simply has no
//! record for a nick (`Ok(None)`). [`UserResolver`] turns the latter into
//! an anonymous [`Requester`].

mod memory;

pub use memory::InMemoryUserStore;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::Result;
use crate::types::{Requester, UserLocation};

/// Keyed storage of [`UserLocation`] records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the record for `nick`.
    ///
    /// `Ok(None)` means no record exists. Fails with
    /// `PersistenceUnavailable` when the store is not initialized or
    /// unreachable.
    async fn get(&self, nick: &str) -> Result<Option<UserLocation>>;

    /// Create the record, or replace the existing one with the same nick.
    async fn upsert(&self, user: UserLocation) -> Result<()>;
}

/// Maps a nick to its stored record, or to an anonymous stand-in.
#[derive(Clone)]
pub struct UserResolver {
    store: Arc<dyn UserStore>,
}

impl UserResolver {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Resolve `nick` to a [`Requester`].
    ///
    /// A missing record yields [`Requester::Anonymous`]; store failures are
    /// returned as-is.
    #[instrument(skip(self))]
    pub async fn resolve(&self, nick: &str) -> Result<Requester> {
        Ok(self.store.get(nick).await?.into())
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }
}
