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
use redis::AsyncCommands;

/// [`TokenStore`] backed by a redis server.
///
/// The connection manager multiplexes a single connection and reconnects by
/// itself, so the handle is cheap to clone into per-message tasks.
#[derive(Clone)]
pub struct RedisStore {
    connection: redis::aio::ConnectionManager,
}

impl RedisStore {
    /// Open a connection to the server at `url`
    /// (e.g. `redis://localhost:6379`).
    ///
    /// # Errors
    ///
    /// * The url is not a valid redis connection string.
    /// * The server cannot be reached.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url).map_err(|source| StoreError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let connection = client
            .get_tokio_connection_manager()
            .await
            .map_err(StoreError::Connection)?;

        Ok(Self { connection })
    }
}

#[async_trait::async_trait]
impl TokenStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.connection
            .clone()
            .get::<_, Option<String>>(key)
            .await
            .map_err(StoreError::Command)
    }

    async fn set_ex(
        &self,
        key: &str,
        value: &str,
        ttl: std::time::Duration,
    ) -> Result<(), StoreError> {
        // `SET key value EX seconds`, rounded up so a sub-second ttl does
        // not become "no expiry at all".
        let seconds = std::cmp::max(1, ttl.as_secs()) as usize;

        self.connection
            .clone()
            .set_ex::<_, _, ()>(key, value, seconds)
            .await
            .map_err(StoreError::Command)
    }

    async fn del(&self, key: &str) -> Result<bool, StoreError> {
        let removed: i64 = self
            .connection
            .clone()
            .del(key)
            .await
            .map_err(StoreError::Command)?;

        Ok(removed > 0)
    }
}
