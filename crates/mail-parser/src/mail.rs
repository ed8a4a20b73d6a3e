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

//! Definition of an email data structure.

use crate::ParserError;

use self::{
    body::Body,
    headers::{Header, Headers},
};

/// Body definition of an email.
pub mod body;
/// Headers definition of an email.
pub mod headers;

pub const FROM_HEADER: &str = "From";
pub const TO_HEADER: &str = "To";

/// Internet Message Format representation: parsed headers, opaque body.
#[derive(Clone, Default, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Mail {
    /// Message headers.
    pub headers: Headers,
    /// Message body content.
    pub body: Body,
}

impl TryFrom<&str> for Mail {
    type Error = ParserError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        crate::parsing::parse(value.as_bytes())
    }
}

impl TryFrom<&[u8]> for Mail {
    type Error = ParserError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        crate::parsing::parse(value)
    }
}

impl Mail {
    /// Get the first header which the name matches the argument.
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&Header> {
        self.headers
            .0
            .iter()
            .find(|header| header.name.eq_ignore_ascii_case(name))
    }

    /// Get all headers which the name matches the argument, in order of
    /// appearance.
    pub fn get_headers<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Header> {
        self.headers
            .iter()
            .filter(|header| header.name.eq_ignore_ascii_case(name))
    }

    /// Count the number of a header occurrence.
    #[must_use]
    pub fn count_header(&self, name: &str) -> usize {
        self.headers
            .0
            .iter()
            .filter(|header| header.name.eq_ignore_ascii_case(name))
            .count()
    }

    /// Push new headers to header list.
    pub fn append_headers(&mut self, headers: impl IntoIterator<Item = Header>) {
        self.headers.extend(headers);
    }

    /// Remove every occurrence of a header from the list.
    ///
    /// Returns the number of headers removed.
    pub fn remove_headers(&mut self, name: &str) -> usize {
        let before = self.headers.len();
        self.headers
            .0
            .retain(|header| !header.name.eq_ignore_ascii_case(name));
        before - self.headers.len()
    }
}

impl std::fmt::Display for Mail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.headers)?;
        f.write_str("\r\n")?;
        write!(f, "{}", self.body)
    }
}
