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

use crate::inspection::internal_error;
use crate::outbound::OutboundSender;
use vdup_common::{CtxMessage, Reply};
use vdup_integrity::{Engine, IntegrityError, IssuedDuplicate};
use vdup_store::TokenStore;

/// Outcome of the duplication decision for one message.
#[derive(Debug)]
pub enum DuplicationStatus {
    /// The message is already a duplicate, nothing to emit.
    Skip,
    /// A duplicate was prepared and its token stored; it can be sent once
    /// the original has been enqueued.
    Ready(IssuedDuplicate),
    /// The token could not be stored, the message is refused.
    Deny(Reply),
}

/// Prepare the duplicate of an outbound message.
///
/// Currently every unmarked outbound mail is duplicated to its sender.
/// This might not make sense if the service is relaying foreign traffic.
#[tracing::instrument(skip_all)]
pub async fn duplicate_to_sender<S: TokenStore>(
    engine: &Engine<S>,
    ctx: &CtxMessage,
) -> DuplicationStatus {
    if ctx.mail.count_header(&engine.params().marker_name) != 0 {
        tracing::debug!("will not duplicate to sender a mail that is already a duplicate");
        return DuplicationStatus::Skip;
    }

    match engine.issue(&ctx.mail).await {
        Ok(issued) => DuplicationStatus::Ready(issued),
        Err(IntegrityError::AlreadyDuplicate) => {
            // guarded by the flag check above, kept total anyway
            tracing::debug!("will not duplicate to sender a mail that is already a duplicate");
            DuplicationStatus::Skip
        }
        Err(IntegrityError::Store(error)) => {
            // Fail closed: without the token record the duplicate could
            // never be told apart from a forgery.
            tracing::error!(%error, "the store is not available");
            DuplicationStatus::Deny(internal_error())
        }
    }
}

/// Hand the prepared duplicate to the outbound sender, fire and forget.
///
/// The duplicate goes back to the message's own sender. An enqueue failure
/// is logged and dropped: the original message's disposition is settled by
/// then and must not change.
pub fn send_duplicate<O: OutboundSender + 'static>(
    sender: std::sync::Arc<O>,
    mail_from: String,
    issued: IssuedDuplicate,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let text = issued.mail.to_string();

        if let Err(error) = sender.send(&mail_from, &mail_from, &text).await {
            tracing::warn!(%error, "failed to enqueue the duplicate to sender");
        }
    })
}
