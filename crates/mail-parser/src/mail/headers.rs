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

use std::ops::{Deref, DerefMut};

/// Header of an email.
/// <https://www.rfc-editor.org/rfc/rfc2822#section-2.2>
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Header {
    pub name: String,
    pub body: String,
}

impl Header {
    /// Create a new header.
    /// This method will add the `\r\n` directly at the end of the value
    /// field.
    pub fn new(name: impl Into<String>, body: impl AsRef<str>) -> Self {
        Self {
            name: name.into(),
            body: format!(" {}\r\n", body.as_ref()),
        }
    }

    /// Create a new header, keeping the body exactly as given, line
    /// terminator included.
    pub fn new_unchecked(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// The header value with surrounding whitespace and the line
    /// terminator removed.
    #[must_use]
    pub fn trimmed_body(&self) -> &str {
        self.body.trim()
    }
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.body)
    }
}

/// List of top-level headers.
/// We use `Vec` instead of a `HashMap` because header ordering is mandatory,
/// and the same name can appear several times.
/// <https://www.rfc-editor.org/rfc/rfc2822#section-3.6>
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Headers(pub Vec<Header>);

impl From<Vec<Header>> for Headers {
    fn from(value: Vec<Header>) -> Self {
        Self(value)
    }
}

impl Deref for Headers {
    type Target = Vec<Header>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Headers {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl std::fmt::Display for Headers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for h in &self.0 {
            write!(f, "{}:{}", h.name, h.body)?;
        }
        Ok(())
    }
}

/// Read the current line or folded content and extracts a header if there is
/// any.
///
/// # Arguments
///
/// * `content` - The buffer of lines to parse. this function has the right
///               to iterate through the buffer because it can parse folded
///               headers.
///
/// # Return
///
/// * `Option<(String, String)>` - An option containing two strings,
///                                the name and value of the header parsed
pub fn read_header<C: AsRef<str>>(content: &mut &[C]) -> Option<(String, String)> {
    let mut split = content[0].as_ref().splitn(2, ':');

    match (split.next(), split.next()) {
        (Some(name), Some(body)) => {
            let folded_body = content[1..]
                .iter()
                .take_while(|line| line.as_ref().starts_with(|c| c == ' ' || c == '\t'))
                .map(|line| {
                    *content = &content[1..];
                    line.as_ref()
                })
                .collect::<Vec<&str>>()
                .join("");

            Some((
                name.trim().into(),
                if folded_body.is_empty() {
                    body.to_string()
                } else {
                    format!("{body}{folded_body}")
                },
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_header() {
        let input = [
            "User-Agent: Mozilla/5.0 (X11; Linux x86_64; rv:78.0) Gecko/20100101\r\n",
            " Thunderbird/78.8.1\r\n",
        ];
        assert_eq!(
            read_header(&mut (&input[..])),
            Some((
                "User-Agent".to_string(),
                " Mozilla/5.0 (X11; Linux x86_64; rv:78.0) Gecko/20100101\r\n Thunderbird/78.8.1\r\n"
                    .to_string()
            ))
        );
    }

    #[test]
    fn test_read_header_without_colon() {
        let input = ["this line is not a header\r\n"];
        assert_eq!(read_header(&mut (&input[..])), None);
    }

    #[test]
    fn test_trimmed_body() {
        assert_eq!(
            Header::new("Subject", "a subject").trimmed_body(),
            "a subject"
        );
        assert_eq!(
            Header::new_unchecked("Subject", "  padded \r\n").trimmed_body(),
            "padded"
        );
    }
}
