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

pub mod api;
pub mod broker;
pub mod ctx;
pub mod reply;

pub use ctx::{CtxDenied, CtxMessage};
pub use reply::Reply;

pub use time;
pub use uuid;

// TODO: enhance that
#[derive(Debug, thiserror::Error)]
pub enum DeserializeError {
    #[error("deserialize error: {0}")]
    Error(serde_json::Error),
}

// TODO: enhance that
// NOTE: do we really want to handle serialization error ?
// our model are supposed to be valid and tested, so .unwrap() is acceptable ?
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("serialize error: {0}")]
    Error(serde_json::Error),
}
