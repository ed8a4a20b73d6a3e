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

//! The duplicator service.
//!
//! Consumes complete received messages, runs the security inspection pass
//! on each of them, hands the accepted ones to delivery and emits a
//! duplicate of every unmarked outbound message back to its sender.

pub mod config;
pub mod duplicate;
pub mod inspection;
pub mod outbound;
