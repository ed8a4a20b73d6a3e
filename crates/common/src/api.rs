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

use crate::broker::Queue;

// NOTE: must put those in a trait, to have a small abstraction layer

/// Declare the queues this service publishes to or consumes from. Safe to
/// call on every boot, declaration is idempotent.
pub async fn declare_queues(channel: &lapin::Channel) -> lapin::Result<()> {
    for queue in [Queue::ToDuplicator, Queue::Delivery, Queue::Quarantine] {
        channel
            .queue_declare(
                queue.as_ref(),
                lapin::options::QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                lapin::types::FieldTable::default(),
            )
            .await?;
    }

    Ok(())
}

/// Hand a message over to the delivery service.
///
/// # Errors
///
/// * The publish failed or was not acknowledged by the broker.
pub async fn write_to_delivery(channel: &lapin::Channel, payload: Vec<u8>) -> lapin::Result<()> {
    publish(channel, Queue::Delivery, payload).await
}

/// Put a denied message in quarantine for operator inspection.
///
/// # Errors
///
/// * The publish failed or was not acknowledged by the broker.
pub async fn write_to_quarantine(channel: &lapin::Channel, payload: Vec<u8>) -> lapin::Result<()> {
    publish(channel, Queue::Quarantine, payload).await
}

async fn publish(channel: &lapin::Channel, queue: Queue, payload: Vec<u8>) -> lapin::Result<()> {
    let confirm = channel
        .basic_publish(
            "",
            queue.as_ref(),
            lapin::options::BasicPublishOptions {
                mandatory: true,
                ..Default::default()
            },
            &payload,
            lapin::BasicProperties::default()
                .with_content_type(lapin::types::ShortString::from("application/json")),
        )
        .await?;

    match confirm.await? {
        lapin::publisher_confirm::Confirmation::Nack(_) => Err(lapin::Error::InvalidChannelState(
            lapin::ChannelState::Error,
        )),
        _ => Ok(()),
    }
}
