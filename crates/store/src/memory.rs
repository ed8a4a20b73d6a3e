/*
 * vDup mail duplication service
 *
 * Copyright (C) 2003 - viridIT SAS
 * Licensed under the Elastic License 2.0
 *
 * You should have received a copy of the Elastic License 2.0 along with
 * this program. If not, see https://www.elastic.co/licensing/elastic-license.
 *
 */

use crate::{StoreError, TokenStore};
use std::collections::HashMap;

/// In-process [`TokenStore`], used by tests and by deployments that run a
/// single service instance and do not want to carry a redis server.
///
/// Expiry is lazy: a key past its deadline is treated as absent and dropped
/// on the next access.
#[derive(Default)]
pub struct MemoryStore {
    entries: tokio::sync::Mutex<HashMap<String, Entry>>,
}

struct Entry {
    value: String,
    expires_at: tokio::time::Instant,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TokenStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some(entry) if entry.expires_at > tokio::time::Instant::now() => {
                Ok(Some(entry.value.clone()))
            }
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_ex(
        &self,
        key: &str,
        value: &str,
        ttl: std::time::Duration,
    ) -> Result<(), StoreError> {
        self.entries.lock().await.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: tokio::time::Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock().await;

        match entries.remove(key) {
            Some(entry) => Ok(entry.expires_at > tokio::time::Instant::now()),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[tokio::test]
    async fn test_set_get_del() {
        let store = MemoryStore::new();

        store
            .set_ex("prefix:token", "shape", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(
            store.get("prefix:token").await.unwrap(),
            Some("shape".to_string())
        );
        assert!(store.del("prefix:token").await.unwrap());
        assert_eq!(store.get("prefix:token").await.unwrap(), None);
        assert!(!store.del("prefix:token").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry() {
        let store = MemoryStore::new();

        store
            .set_ex("k", "v", Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(61)).await;

        assert_eq!(store.get("k").await.unwrap(), None);
        // the expired key is gone for every later access as well
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_refreshes_expiry() {
        let store = MemoryStore::new();

        store
            .set_ex("k", "v1", Duration::from_secs(10))
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(5)).await;
        store
            .set_ex("k", "v2", Duration::from_secs(10))
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(7)).await;

        assert_eq!(store.get("k").await.unwrap(), Some("v2".to_string()));
    }
}
