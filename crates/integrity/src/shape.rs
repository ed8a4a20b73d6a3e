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

use vdup_mail_parser::mail::headers::Header;
use vdup_mail_parser::Mail;

/// Header fields that must survive a loopback delivery unchanged. Anything
/// a relay is free to rewrite (Received, Message-ID, ...) must stay out of
/// this list or legitimate duplicates would fail verification.
pub const STABLE_HEADERS: [&str; 5] = ["From", "To", "Cc", "Subject", "Date"];

/// The shape of a mail determined by its stable headers, used to ensure the
/// integrity of duplicated mails.
///
/// Two mails with the same values for [`STABLE_HEADERS`] have the same
/// shape, whatever the ordering of their header sections, the rest of their
/// headers or their bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailShape(String);

impl MailShape {
    /// Canonicalize the stable headers of a mail.
    ///
    /// A missing field contributes an empty string, never an absence, so the
    /// shape is total over all messages. The `(name, value)` pairs are
    /// sorted by name and serialized as a json list, making the result
    /// independent of header insertion order.
    #[must_use]
    pub fn of(mail: &Mail) -> Self {
        let mut pairs = STABLE_HEADERS
            .iter()
            .map(|&name| {
                (
                    name,
                    mail.get_header(name)
                        .map_or("", Header::trimmed_body)
                        .to_string(),
                )
            })
            .collect::<Vec<_>>();
        pairs.sort();

        Self(serde_json::to_string(&pairs).expect("a list of string pairs always serializes"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MailShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shape_is_canonical_json_of_sorted_pairs() {
        let mail = Mail::try_from(
            "From: a@x.com\r\n\
             To: b@y.com\r\n\
             Subject: Hi\r\n\
             Date: D1\r\n\
             \r\n\
             body\r\n",
        )
        .unwrap();

        assert_eq!(
            MailShape::of(&mail).as_str(),
            r#"[["Cc",""],["Date","D1"],["From","a@x.com"],["Subject","Hi"],["To","b@y.com"]]"#
        );
    }

    #[test]
    fn test_shape_ignores_header_order_and_noise() {
        let first = Mail::try_from(
            "From: a@x.com\r\n\
             To: b@y.com\r\n\
             Cc: c@z.com\r\n\
             Subject: Hi\r\n\
             Date: D1\r\n\
             \r\n\
             one body\r\n",
        )
        .unwrap();
        let second = Mail::try_from(
            "Date: D1\r\n\
             Subject: Hi\r\n\
             X-Mailer: something\r\n\
             Cc: c@z.com\r\n\
             To: b@y.com\r\n\
             Received: from elsewhere\r\n\
             From: a@x.com\r\n\
             \r\n\
             a completely different body\r\n",
        )
        .unwrap();

        assert_eq!(MailShape::of(&first), MailShape::of(&second));
    }

    #[test]
    fn test_shape_total_over_missing_fields() {
        let mail = Mail::try_from("X-Other: value\r\n\r\nbody\r\n").unwrap();

        assert_eq!(
            MailShape::of(&mail).as_str(),
            r#"[["Cc",""],["Date",""],["From",""],["Subject",""],["To",""]]"#
        );
    }

    #[test]
    fn test_shape_detects_stable_field_change() {
        let original = Mail::try_from("From: a@x.com\r\nSubject: Hi\r\n\r\n").unwrap();
        let tampered = Mail::try_from("From: a@x.com\r\nSubject: Hello\r\n\r\n").unwrap();

        assert_ne!(MailShape::of(&original), MailShape::of(&tampered));
    }

    #[test]
    fn test_shape_uses_first_occurrence() {
        let mail = Mail::try_from("Subject: one\r\nSubject: two\r\n\r\n").unwrap();

        assert_eq!(
            MailShape::of(&mail).as_str(),
            r#"[["Cc",""],["Date",""],["From",""],["Subject","one"],["To",""]]"#
        );
    }
}
