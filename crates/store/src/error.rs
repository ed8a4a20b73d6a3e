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

/// Errors raised when talking to the shared store.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid store url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        source: redis::RedisError,
    },
    #[error("failed to connect to the store: {0}")]
    Connection(redis::RedisError),
    #[error("store command failed: {0}")]
    Command(redis::RedisError),
}
