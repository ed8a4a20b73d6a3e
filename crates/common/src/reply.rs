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

/// An SMTP reply line, code and text.
/// <https://www.rfc-editor.org/rfc/rfc5321#section-4.2>
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Reply {
    code: u16,
    text: String,
}

impl Reply {
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.code
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replies in the 5xx range terminate the transaction for good.
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        self.code >= 500 && self.code < 600
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid smtp reply: `{0}`")]
pub struct InvalidReply(String);

impl std::str::FromStr for Reply {
    type Err = InvalidReply;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.strip_suffix("\r\n").unwrap_or(s);
        let (code, text) = line
            .split_once(' ')
            .ok_or_else(|| InvalidReply(s.to_string()))?;

        let code = code
            .parse::<u16>()
            .map_err(|_| InvalidReply(s.to_string()))?;
        if !(200..600).contains(&code) {
            return Err(InvalidReply(s.to_string()));
        }

        Ok(Self {
            code,
            text: text.to_string(),
        })
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}\r\n", self.code, self.text)
    }
}
