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

//! The integrity protocol behind duplicate-to-sender.
//!
//! A duplicated message carries a marker header ("this is a duplicate, do
//! not duplicate it again") and a single-use security token. The token is
//! bound, through the shared store, to the shape of the message it was
//! issued for: a marker that arrives without a token, with a consumed or
//! expired token, or on a message whose stable headers no longer match, is
//! treated as a forgery and the message is denied.

/// Issue and verify duplication tokens.
pub mod engine;
/// Canonical digest of a message's identity-defining headers.
pub mod shape;
/// Single-use secret correlating a duplicate with its origin.
pub mod token;

pub use engine::{Engine, IntegrityError, IssuedDuplicate, ProtocolParams, Verification};
pub use shape::MailShape;
pub use token::SecurityToken;
