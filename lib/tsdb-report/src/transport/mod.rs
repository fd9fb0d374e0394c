/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 the tsdb-report authors
 */

use ahash::AHashSet;

use crate::types::MetricRecord;

mod buf;
pub use buf::BufTransport;

mod console;
pub use console::ConsoleTransport;

mod discard;
pub use discard::DiscardTransport;

/// Delivery collaborator for one tick's batch. Called exactly once per tick,
/// fire-and-forget: implementations own serialization, delivery and error
/// handling, and failures never reach the reporter. A delta already recorded
/// for a failed batch is not re-sent.
pub trait ReportTransport {
    fn send(&self, application_id: &str, batch: AHashSet<MetricRecord>);
}
