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

/// Queues the duplicator talks to. All of them are durable and publishing
/// goes through the default exchange.
#[derive(Clone, PartialEq, Eq, Hash, strum::AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Queue {
    /// Complete received messages waiting for the inspection pass.
    ToDuplicator,
    /// Messages that passed inspection, handed over to the delivery
    /// service.
    Delivery,
    /// Messages the inspection pass refused.
    Quarantine,
}
