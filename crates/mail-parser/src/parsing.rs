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

use crate::mail::body::Body;
use crate::mail::headers::{read_header, Header, Headers};
use crate::mail::Mail;
use crate::ParserResult;

/// A line containing at most its terminator separates headers from body.
fn is_separator(line: &str) -> bool {
    matches!(line, "\r\n" | "\n" | "")
}

/// Parse a complete raw message.
///
/// The header block is everything up to the first blank line; the rest is
/// stored untouched as the body. Both bare `\n` and `\r\n` terminated lines
/// are accepted, and whatever terminator a line came with is the one it
/// keeps.
///
/// # Errors
///
/// * The input is not valid utf8.
pub fn parse(input: &[u8]) -> ParserResult<Mail> {
    let text = std::str::from_utf8(input)?;
    let lines = text.split_inclusive('\n').collect::<Vec<_>>();

    let mut headers = Headers(Vec::with_capacity(16));
    let remaining = &mut &lines[..];

    while !remaining.is_empty() {
        if is_separator(remaining[0]) {
            *remaining = &remaining[1..];

            if remaining.is_empty() {
                return Ok(Mail {
                    headers,
                    body: Body::Empty,
                });
            }

            return Ok(Mail {
                headers,
                body: Body::Raw(remaining.iter().map(ToString::to_string).collect()),
            });
        }

        match read_header(remaining) {
            Some((name, value)) => {
                headers.0.push(Header::new_unchecked(name, value));
                *remaining = &remaining[1..];
            }
            // A line without a colon before the separator: the header
            // section is over, the rest belongs to the body.
            None => {
                return Ok(Mail {
                    headers,
                    body: Body::Raw(remaining.iter().map(ToString::to_string).collect()),
                });
            }
        }
    }

    Ok(Mail {
        headers,
        body: Body::Empty,
    })
}
