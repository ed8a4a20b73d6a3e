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

/// Errors raised by the parser.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    ///
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// The message is not valid utf8.
    #[error("message is not valid utf8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),
    ///
    #[error("parsing email failed: {0}")]
    InvalidMail(String),
}

/// Result emitted by the parser.
pub type ParserResult<T> = Result<T, ParserError>;
