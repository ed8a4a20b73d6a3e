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

//! The shared ephemeral key-value store used by the integrity protocol.
//!
//! The store is the only coordination point between the duplication and
//! inspection passes, which may run in different processes. Everything the
//! protocol needs from it fits in three primitives: an atomic read, an
//! atomic write-with-expiry and an atomic delete.

mod error;
pub mod memory;
pub mod redis_client;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use redis_client::RedisStore;

/// Ephemeral key-value storage with per-key expiry.
///
/// Implementations must provide atomicity per call from concurrent callers:
/// two tasks deleting the same key must observe exactly one removal.
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync {
    /// Read a key. `None` when the key does not exist or has expired.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a key with a time-to-live, `SET ... EX` semantics.
    async fn set_ex(
        &self,
        key: &str,
        value: &str,
        ttl: std::time::Duration,
    ) -> Result<(), StoreError>;

    /// Delete a key. Returns whether a key was actually removed.
    async fn del(&self, key: &str) -> Result<bool, StoreError>;
}
