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

use pretty_assertions::assert_eq;
use vdup_integrity::{Engine, IntegrityError, ProtocolParams};
use vdup_mail_parser::Mail;
use vdup_store::{MemoryStore, StoreError, TokenStore};

const OUTBOUND: &str = "From: a@x.com\r\n\
                        To: b@y.com\r\n\
                        Subject: Hi\r\n\
                        Date: D1\r\n\
                        \r\n\
                        See you soon.\r\n";

fn engine() -> Engine<MemoryStore> {
    Engine::new(MemoryStore::new(), ProtocolParams::default())
}

/// Issue on an outbound mail, then verify the produced duplicate as it
/// would come back after a loopback delivery.
#[tokio::test]
async fn round_trip() {
    let engine = engine();
    let outbound = Mail::try_from(OUTBOUND).unwrap();

    let issued = engine.issue(&outbound).await.unwrap();
    assert_eq!(issued.mail.count_header("X-Vdup-Duplicate"), 1);
    assert_eq!(issued.mail.count_header("X-Vdup-Token"), 1);

    // the duplicate travels as raw bytes and is parsed again on the way in
    let mut inbound = Mail::try_from(issued.mail.to_string().as_str()).unwrap();

    let verification = engine.verify(&mut inbound).await.unwrap();
    assert!(verification.verified);

    // the token header never survives inspection, the marker does
    assert_eq!(inbound.count_header("X-Vdup-Token"), 0);
    assert_eq!(inbound.count_header("X-Vdup-Duplicate"), 1);
}

#[tokio::test]
async fn round_trip_leaves_no_store_record() {
    let store = MemoryStore::new();
    let engine = Engine::new(store, ProtocolParams::default());
    let outbound = Mail::try_from(OUTBOUND).unwrap();

    let issued = engine.issue(&outbound).await.unwrap();
    let mut inbound = Mail::try_from(issued.mail.to_string().as_str()).unwrap();
    assert!(engine.verify(&mut inbound).await.unwrap().verified);

    // consumed on success: a replay of the very same message is rejected
    let mut replay = Mail::try_from(issued.mail.to_string().as_str()).unwrap();
    assert!(!engine.verify(&mut replay).await.unwrap().verified);
}

#[tokio::test]
async fn tampered_stable_header_is_rejected() {
    let engine = engine();
    let outbound = Mail::try_from(OUTBOUND).unwrap();

    let issued = engine.issue(&outbound).await.unwrap();
    let tampered = issued.mail.to_string().replace("Subject: Hi", "Subject: Hello");
    let mut inbound = Mail::try_from(tampered.as_str()).unwrap();

    assert!(!engine.verify(&mut inbound).await.unwrap().verified);
    // header stripped regardless of the outcome
    assert_eq!(inbound.count_header("X-Vdup-Token"), 0);
}

/// A mismatch must leave the record in place: the genuine duplicate can
/// still verify afterwards.
#[tokio::test]
async fn mismatch_does_not_consume_the_token() {
    let engine = engine();
    let outbound = Mail::try_from(OUTBOUND).unwrap();

    let issued = engine.issue(&outbound).await.unwrap();

    let tampered = issued.mail.to_string().replace("a@x.com", "evil@x.com");
    let mut forged = Mail::try_from(tampered.as_str()).unwrap();
    assert!(!engine.verify(&mut forged).await.unwrap().verified);

    let mut genuine = Mail::try_from(issued.mail.to_string().as_str()).unwrap();
    assert!(engine.verify(&mut genuine).await.unwrap().verified);
}

#[tokio::test]
async fn unknown_token_is_rejected() {
    let engine = engine();
    let raw = format!("{}X-Vdup-Token: {}\r\n\r\n", "From: a@x.com\r\n", "ab".repeat(32));
    let mut inbound = Mail::try_from(raw.as_str()).unwrap();

    assert!(!engine.verify(&mut inbound).await.unwrap().verified);
    assert_eq!(inbound.count_header("X-Vdup-Token"), 0);
}

#[tokio::test]
async fn message_without_token_is_simply_unverified() {
    let engine = engine();
    let mut inbound = Mail::try_from(OUTBOUND).unwrap();

    assert!(!engine.verify(&mut inbound).await.unwrap().verified);
}

/// Two token headers are joined into one opaque value, which matches no
/// stored record.
#[tokio::test]
async fn multiple_token_headers_never_match() {
    let engine = engine();
    let outbound = Mail::try_from(OUTBOUND).unwrap();
    let issued = engine.issue(&outbound).await.unwrap();

    let duplicated_header = issued.mail.to_string().replace(
        "X-Vdup-Token:",
        &format!("X-Vdup-Token: {}\r\nX-Vdup-Token:", issued.token),
    );
    let mut inbound = Mail::try_from(duplicated_header.as_str()).unwrap();
    assert_eq!(inbound.count_header("X-Vdup-Token"), 2);

    assert!(!engine.verify(&mut inbound).await.unwrap().verified);
    assert_eq!(inbound.count_header("X-Vdup-Token"), 0);
}

#[tokio::test(start_paused = true)]
async fn token_expires_with_the_store_record() {
    let engine = engine();
    let outbound = Mail::try_from(OUTBOUND).unwrap();

    let issued = engine.issue(&outbound).await.unwrap();

    tokio::time::advance(std::time::Duration::from_secs(61)).await;

    let mut inbound = Mail::try_from(issued.mail.to_string().as_str()).unwrap();
    assert!(!engine.verify(&mut inbound).await.unwrap().verified);

    // unresolvable forever after expiry, not only once
    let mut again = Mail::try_from(issued.mail.to_string().as_str()).unwrap();
    assert!(!engine.verify(&mut again).await.unwrap().verified);
}

#[tokio::test]
async fn issue_refuses_a_marked_message() {
    let engine = engine();
    let marked = Mail::try_from(
        "From: a@x.com\r\n\
         X-Vdup-Duplicate: yes\r\n\
         \r\n\
         body\r\n",
    )
    .unwrap();

    assert!(matches!(
        engine.issue(&marked).await,
        Err(IntegrityError::AlreadyDuplicate)
    ));
}

struct UnreachableStore;

#[async_trait::async_trait]
impl TokenStore for UnreachableStore {
    async fn get(&self, _: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Connection(std::io::Error::from(std::io::ErrorKind::ConnectionRefused).into()))
    }

    async fn set_ex(
        &self,
        _: &str,
        _: &str,
        _: std::time::Duration,
    ) -> Result<(), StoreError> {
        Err(StoreError::Connection(std::io::Error::from(std::io::ErrorKind::ConnectionRefused).into()))
    }

    async fn del(&self, _: &str) -> Result<bool, StoreError> {
        Err(StoreError::Connection(std::io::Error::from(std::io::ErrorKind::ConnectionRefused).into()))
    }
}

/// The protocol fails closed: with the store down neither pass proceeds.
#[tokio::test]
async fn store_outage_fails_closed() {
    let engine = Engine::new(UnreachableStore, ProtocolParams::default());
    let outbound = Mail::try_from(OUTBOUND).unwrap();

    assert!(matches!(
        engine.issue(&outbound).await,
        Err(IntegrityError::Store(_))
    ));

    let with_token = format!("From: a@x.com\r\nX-Vdup-Token: {}\r\n\r\n", "ab".repeat(32));
    let mut inbound = Mail::try_from(with_token.as_str()).unwrap();
    assert!(matches!(
        engine.verify(&mut inbound).await,
        Err(IntegrityError::Store(_))
    ));

    // even on outage the internal header is stripped
    assert_eq!(inbound.count_header("X-Vdup-Token"), 0);
}
