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

use futures_lite::stream::StreamExt;
use std::sync::Arc;
use vdup_common::{
    api::{self, declare_queues},
    broker::Queue,
    ctx::CtxDenied,
    CtxMessage,
};
use vdup_config::Config;
use vdup_duplicator::{
    config,
    duplicate::{self, DuplicationStatus},
    inspection::{self, InspectionStatus},
    outbound::AmqpSender,
};
use vdup_integrity::Engine;
use vdup_store::{RedisStore, TokenStore};

async fn quarantine(channel: &lapin::Channel, reply: vdup_common::Reply, message: CtxMessage) {
    tracing::warn!(code = reply.code(), "message denied, putting it in quarantine");

    let payload = CtxDenied { reply, message }.to_json().unwrap();
    if let Err(error) = api::write_to_quarantine(channel, payload).await {
        tracing::error!(%error, "failed to write to quarantine");
    }
}

#[tracing::instrument(name = "duplicator_", skip_all, fields(
    uuid = ?ctx.uuid.to_string()[0..8],
))]
async fn process<S: TokenStore>(
    channel: &lapin::Channel,
    engine: Arc<Engine<S>>,
    sender: Arc<AmqpSender>,
    mut ctx: CtxMessage,
) {
    if let InspectionStatus::Deny(reply) =
        inspection::security_inspection(&engine, &mut ctx.mail).await
    {
        quarantine(channel, reply, ctx).await;
        return;
    }

    // The duplicate and its token record are prepared before the original
    // is enqueued, and sent only after: the token is always visible to
    // verification before the duplicate exists.
    let duplication = match duplicate::duplicate_to_sender(&engine, &ctx).await {
        DuplicationStatus::Deny(reply) => {
            quarantine(channel, reply, ctx).await;
            return;
        }
        DuplicationStatus::Ready(issued) => Some(issued),
        DuplicationStatus::Skip => None,
    };

    let payload = ctx.to_json().unwrap();
    if let Err(error) = api::write_to_delivery(channel, payload).await {
        tracing::error!(%error, "failed to hand the message over to delivery");
        return;
    }

    if let Some(issued) = duplication {
        duplicate::send_duplicate(sender, ctx.mail_from.clone(), issued);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::prelude::*;

    let args = <config::cli::Args as clap::Parser>::parse();
    let config = config::DuplicatorConfig::from_rhai_file(&args.config).map_err(|error| {
        eprintln!("Failed to boot Duplicator service: {error}");
        error
    })?;

    let filter = config.logs.targets_filter();
    match &config.logs.facility {
        vdup_config::LogsFacility::Console => {
            tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer().with_filter(filter))
                .try_init()?;
        }
        vdup_config::LogsFacility::File(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Arc::new(file))
                        .with_ansi(false)
                        .with_filter(filter),
                )
                .try_init()?;
        }
    }

    std::panic::set_hook(Box::new(|e| {
        tracing::error!(?e, "Panic occurred");
    }));

    let store = tokio::time::timeout(
        config.store.connect_timeout,
        RedisStore::connect(&config.store.url),
    )
    .await
    .map_err(|_| format!("timed out connecting to the store at {}", config.store.url))??;

    let engine = Arc::new(Engine::new(store, config.protocol_params()));

    let conn = config.broker().connect().await?;
    let channel = conn.create_channel().await?;
    channel
        .confirm_select(lapin::options::ConfirmSelectOptions::default())
        .await?;
    channel
        .basic_qos(1, lapin::options::BasicQosOptions::default())
        .await?;

    declare_queues(&channel).await?;

    let mut consumer = channel
        .basic_consume(
            Queue::ToDuplicator.as_ref(),
            "",
            lapin::options::BasicConsumeOptions::default(),
            lapin::types::FieldTable::default(),
        )
        .await?;

    let sender = Arc::new(AmqpSender::new(channel.clone()));

    tracing::info!(name = %config.name, "Duplicator service is starting");
    while let Some(delivery) = consumer.next().await {
        let delivery = delivery.expect("error in consumer");

        let lapin::message::Delivery { data, .. } = &delivery;
        let ctx = match CtxMessage::from_json(data) {
            Ok(ctx) => ctx,
            Err(e) => {
                tracing::warn!(error = %e, "dropping an invalid payload");
                delivery
                    .ack(lapin::options::BasicAckOptions::default())
                    .await
                    .expect("ack");
                continue;
            }
        };

        delivery
            .ack(lapin::options::BasicAckOptions::default())
            .await
            .expect("ack");

        let engine = engine.clone();
        let sender = sender.clone();
        let channel = channel.clone();
        tokio::spawn(async move { process(&channel, engine, sender, ctx).await });
    }

    Ok(())
}
