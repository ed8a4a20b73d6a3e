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

use vdup_common::Reply;
use vdup_integrity::Engine;
use vdup_mail_parser::Mail;
use vdup_store::TokenStore;

/// Outcome of the inspection pass for one message.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum InspectionStatus {
    /// The message may proceed through the pipeline.
    Next,
    /// The message is refused with the given reply.
    Deny(Reply),
}

/// Plain denial, no internal detail leaked to the remote party.
pub(crate) fn default_deny() -> Reply {
    "554 permanent problems with the remote server\r\n"
        .parse::<Reply>()
        .unwrap()
}

/// Something on our side went wrong or is being exploited.
pub(crate) fn internal_error() -> Reply {
    "451 internal server error\r\n".parse::<Reply>().unwrap()
}

/// Maintain the duplicate flag and security token headers.
///
/// The security token must be correct, and the stable header items must
/// match the stored value, for the duplicate flag to be allowed through.
/// The token header is stripped from the message in every case.
#[tracing::instrument(skip_all)]
pub async fn security_inspection<S: TokenStore>(
    engine: &Engine<S>,
    mail: &mut Mail,
) -> InspectionStatus {
    let verification = match engine.verify(mail).await {
        Ok(verification) => verification,
        Err(error) => {
            // Fail closed: an unreachable store never downgrades to
            // "skip the check".
            tracing::error!(%error, "the store is not available");
            return InspectionStatus::Deny(internal_error());
        }
    };

    let flag_name = &engine.params().marker_name;
    let flag_count = mail.count_header(flag_name);

    if flag_count != 0 {
        if !verification.verified {
            tracing::warn!(
                header = %flag_name,
                "disallowed header item, plugin bug (most likely) or a malicious attempt"
            );
            return InspectionStatus::Deny(default_deny());
        }
        if flag_count != 1 {
            tracing::error!(
                header = %flag_name,
                count = flag_count,
                "header item should not appear more than once"
            );
            return InspectionStatus::Deny(internal_error());
        }
    }

    InspectionStatus::Next
}
