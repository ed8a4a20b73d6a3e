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

use crate::{DeserializeError, Reply, SerializeError};
use vdup_mail_parser::Mail;

/// A complete received message as it travels between services.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CtxMessage {
    pub uuid: uuid::Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub received_at: time::OffsetDateTime,
    /// Envelope sender (reverse path).
    pub mail_from: String,
    /// Envelope recipients (forward paths).
    pub rcpt_to: Vec<String>,
    pub mail: Mail,
}

impl CtxMessage {
    #[must_use]
    pub fn new(mail_from: String, rcpt_to: Vec<String>, mail: Mail) -> Self {
        Self {
            uuid: uuid::Uuid::new_v4(),
            received_at: time::OffsetDateTime::now_utc(),
            mail_from,
            rcpt_to,
            mail,
        }
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, DeserializeError> {
        serde_json::from_slice(bytes).map_err(DeserializeError::Error)
    }

    pub fn to_json(&self) -> Result<Vec<u8>, SerializeError> {
        serde_json::to_vec(self).map_err(SerializeError::Error)
    }
}

/// A message the inspection pass refused, with the reply the edge should
/// relay to the client.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CtxDenied {
    pub reply: Reply,
    pub message: CtxMessage,
}

impl CtxDenied {
    pub fn from_json(bytes: &[u8]) -> Result<Self, DeserializeError> {
        serde_json::from_slice(bytes).map_err(DeserializeError::Error)
    }

    pub fn to_json(&self) -> Result<Vec<u8>, SerializeError> {
        serde_json::to_vec(self).map_err(SerializeError::Error)
    }
}
