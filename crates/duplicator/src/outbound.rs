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

use vdup_common::{api, CtxMessage};
use vdup_mail_parser::Mail;

/// Errors raised when enqueueing a duplicate.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, thiserror::Error)]
pub enum OutboundError {
    #[error("failed to rebuild the duplicate: {0}")]
    Parser(#[from] vdup_mail_parser::ParserError),
    #[error("failed to encode the duplicate context: {0}")]
    Serialize(#[from] vdup_common::SerializeError),
    #[error("failed to publish the duplicate: {0}")]
    Broker(#[from] lapin::Error),
}

/// Asynchronous hand-off of a complete message to delivery.
///
/// Enqueue only: a delivery failure is reported later through the delivery
/// service's own reporting, never to the caller of [`Self::send`].
#[async_trait::async_trait]
pub trait OutboundSender: Send + Sync {
    async fn send(&self, from: &str, to: &str, message: &str) -> Result<(), OutboundError>;
}

/// [`OutboundSender`] publishing to the delivery queue.
pub struct AmqpSender {
    channel: lapin::Channel,
}

impl AmqpSender {
    #[must_use]
    pub const fn new(channel: lapin::Channel) -> Self {
        Self { channel }
    }
}

#[async_trait::async_trait]
impl OutboundSender for AmqpSender {
    async fn send(&self, from: &str, to: &str, message: &str) -> Result<(), OutboundError> {
        let mail = Mail::try_from(message)?;
        let ctx = CtxMessage::new(from.to_string(), vec![to.to_string()], mail);

        api::write_to_delivery(&self.channel, ctx.to_json()?).await?;

        Ok(())
    }
}
