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

//! A library to read and modify the header section of emails.
//!
//! The body is kept as an opaque block of lines: this crate never looks
//! inside MIME parts, it only guarantees that the bytes it was given come
//! back out unchanged.

/// Errors raised by the parser.
pub mod errors;
/// Rust representation of an email.
pub mod mail;
/// Code to split a raw message into headers and body.
pub mod parsing;

pub use errors::{ParserError, ParserResult};
pub use mail::Mail;
