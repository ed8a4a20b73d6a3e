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

/// Body of an email, kept as the lines it was received as.
///
/// The duplication service never interprets the body: it only needs the
/// exact bytes back when a message is copied. Line terminators are part of
/// each stored line.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum Body {
    /// The message ended right after its header section.
    #[default]
    Empty,
    /// Unparsed content, one entry per line, terminators included.
    Raw(Vec<String>),
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Raw(lines) => {
                for line in lines {
                    f.write_str(line)?;
                }
                Ok(())
            }
        }
    }
}
