//! In-process user store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::UserStore;
use crate::types::UserLocation;
use crate::{Result, WeatherError};

/// A [`UserStore`] held in memory.
///
/// Starts either ready ([`new`](Self::new)) or in the "table missing"
/// state ([`uninitialized`](Self::uninitialized)), where every operation
/// fails with `PersistenceUnavailable` until [`initialize`](Self::initialize)
/// is called.
#[derive(Debug)]
pub struct InMemoryUserStore {
    users: RwLock<Option<HashMap<String, UserLocation>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Some(HashMap::new())),
        }
    }

    pub fn uninitialized() -> Self {
        Self {
            users: RwLock::new(None),
        }
    }

    /// Make the store usable. Existing records are kept.
    pub async fn initialize(&self) {
        self.users.write().await.get_or_insert_with(HashMap::new);
    }

    /// Number of stored records (zero when uninitialized).
    pub async fn len(&self) -> usize {
        self.users.read().await.as_ref().map_or(0, HashMap::len)
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn not_initialized() -> WeatherError {
    WeatherError::PersistenceUnavailable("user store is not initialized".to_string())
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get(&self, nick: &str) -> Result<Option<UserLocation>> {
        let users = self.users.read().await;
        let users = users.as_ref().ok_or_else(not_initialized)?;
        Ok(users.get(nick).cloned())
    }

    async fn upsert(&self, user: UserLocation) -> Result<()> {
        let mut users = self.users.write().await;
        let users = users.as_mut().ok_or_else(not_initialized)?;
        users.insert(user.nick.clone(), user);
        Ok(())
    }
}
