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

use crate::{MailShape, SecurityToken};
use vdup_mail_parser::mail::headers::Header;
use vdup_mail_parser::Mail;
use vdup_store::{StoreError, TokenStore};

/// Protocol constants shared by the duplication and inspection passes.
///
/// Both passes of one deployment must agree on every field here, or issued
/// tokens will never verify. They come from the `duplicate` configuration
/// section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolParams {
    /// Name of the header marking a message as already-a-duplicate.
    pub marker_name: String,
    /// Value the marker header is emitted with.
    pub marker_value: String,
    /// Name of the internal header carrying the security token.
    pub token_header: String,
    /// Namespace prepended to every store key.
    pub key_prefix: String,
    /// How long an unconsumed token survives in the store. Long enough for
    /// an ordinary loopback delivery, short enough to bound a forgery
    /// window.
    pub token_ttl: std::time::Duration,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            marker_name: "X-Vdup-Duplicate".to_string(),
            marker_value: "yes".to_string(),
            token_header: "X-Vdup-Token".to_string(),
            key_prefix: "vdup".to_string(),
            token_ttl: std::time::Duration::from_secs(60),
        }
    }
}

/// Outcome of [`Engine::verify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    /// The message carried a token bound to its own shape, and the token
    /// had not been consumed before.
    pub verified: bool,
}

/// A duplicate produced by [`Engine::issue`], ready to be handed to the
/// outbound sender.
#[derive(Debug)]
pub struct IssuedDuplicate {
    pub token: SecurityToken,
    /// The original message plus the marker and token headers.
    pub mail: Mail,
}

/// Errors raised by the protocol engine.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, thiserror::Error)]
pub enum IntegrityError {
    /// Issuing a duplicate of a duplicate would loop forever.
    #[error("the message is already a duplicate, refusing to duplicate it again")]
    AlreadyDuplicate,
    /// The shared store could not be reached: the protocol fails closed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Issues single-use tokens at duplication time and consumes them at
/// inspection time. The shared store is the only source of truth: no state
/// is kept in the engine itself, so any number of engines across any number
/// of processes cooperate safely.
pub struct Engine<S> {
    store: S,
    params: ProtocolParams,
}

impl<S: TokenStore> Engine<S> {
    pub fn new(store: S, params: ProtocolParams) -> Self {
        Self { store, params }
    }

    #[must_use]
    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    fn key_of(&self, token: &str) -> String {
        format!("{}:{}", self.params.key_prefix, token)
    }

    /// Issue a duplication token for an outbound message and build the
    /// duplicate carrying it.
    ///
    /// The record `prefix:token = shape` is written with the configured ttl
    /// before this returns, so the token is visible to verification as soon
    /// as the duplicate exists.
    ///
    /// # Errors
    ///
    /// * The message already carries the marker header.
    /// * The store is unreachable.
    pub async fn issue(&self, mail: &Mail) -> Result<IssuedDuplicate, IntegrityError> {
        if mail.count_header(&self.params.marker_name) != 0 {
            return Err(IntegrityError::AlreadyDuplicate);
        }

        // The shape is captured from the original headers here, before the
        // caller goes asynchronous: the message object's lifetime is not
        // guaranteed through the duplication task.
        let shape = MailShape::of(mail);
        let token = SecurityToken::generate();

        self.store
            .set_ex(
                &self.key_of(token.as_str()),
                shape.as_str(),
                self.params.token_ttl,
            )
            .await?;

        let mut duplicate = mail.clone();
        duplicate.append_headers([
            Header::new(&self.params.marker_name, &self.params.marker_value),
            Header::new(&self.params.token_header, token.as_str()),
        ]);

        tracing::debug!("issued a duplication token");

        Ok(IssuedDuplicate {
            token,
            mail: duplicate,
        })
    }

    /// Check whether an inbound message carries a token bound to its own
    /// shape, consuming the token on success.
    ///
    /// The security token header is removed from the message in every case,
    /// success, failure or store outage: it is internal protocol signaling
    /// and must never reach a downstream recipient.
    ///
    /// # Errors
    ///
    /// * The store is unreachable (the caller must deny, not skip).
    pub async fn verify(&self, mail: &mut Mail) -> Result<Verification, IntegrityError> {
        let occurrences = mail
            .get_headers(&self.params.token_header)
            .map(Header::trimmed_body)
            .map(str::to_string)
            .collect::<Vec<_>>();

        if occurrences.is_empty() {
            // Not claiming to be a verified duplicate: nothing to look up.
            return Ok(Verification { verified: false });
        }

        // No more than one token header should legally appear. Joining the
        // values makes a multi-header message fail the lookup like any
        // other unknown token, without a special case.
        let token = occurrences.join("\n");

        let outcome = self.consume(mail, &token).await;

        mail.remove_headers(&self.params.token_header);

        outcome.map(|verified| Verification { verified })
    }

    async fn consume(&self, mail: &Mail, token: &str) -> Result<bool, IntegrityError> {
        let key = self.key_of(token);

        let Some(stored) = self.store.get(&key).await? else {
            // Never issued, expired, or already consumed.
            tracing::warn!(
                "verification of the security token failed, \
                 plugin bug (most likely) or a malicious attempt"
            );
            return Ok(false);
        };

        let inbound = MailShape::of(mail);
        if inbound.as_str() != stored {
            // Leave the record in place to expire naturally.
            tracing::warn!(
                "stable headers changed between duplication and inspection, \
                 plugin bug (most likely) or a malicious attempt"
            );
            return Ok(false);
        }

        // Single use: replaying the same token must fail even inside the
        // ttl window. The delete racing the key's expiry is benign.
        if !self.store.del(&key).await? {
            tracing::debug!("token record was already gone when consumed");
        }

        Ok(true)
    }
}
