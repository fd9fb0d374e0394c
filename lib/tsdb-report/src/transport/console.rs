/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 the tsdb-report authors
 */

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use ahash::AHashSet;
use log::warn;
use serde_json::{Map, Number, Value};

use super::ReportTransport;
use crate::types::MetricRecord;

/// Writes one JSON object per record to stdout.
pub struct ConsoleTransport {
    create_instant: Instant,
    last_error_report: AtomicU64,
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        ConsoleTransport::new()
    }
}

impl ConsoleTransport {
    pub fn new() -> Self {
        ConsoleTransport {
            create_instant: Instant::now(),
            last_error_report: AtomicU64::new(0),
        }
    }

    fn handle_write_error(&self, e: io::Error) {
        let time_slice = self.create_instant.elapsed().as_secs().rotate_right(6); // every 64s
        if self.last_error_report.swap(time_slice, Ordering::Relaxed) != time_slice {
            warn!("writing records error: {e:?}");
        }
    }
}

fn record_to_json(application_id: &str, record: &MetricRecord) -> Value {
    let mut map = Map::with_capacity(5);
    map.insert(
        "application".to_string(),
        Value::String(application_id.to_string()),
    );
    map.insert("metric".to_string(), Value::String(record.name.clone()));
    map.insert(
        "timestamp".to_string(),
        Value::Number(Number::from(record.timestamp)),
    );
    map.insert(
        "value".to_string(),
        Value::Number(record.value.as_json_number()),
    );
    let mut tag_map = Map::with_capacity(record.tags.len());
    for (name, value) in record.tags.iter() {
        tag_map.insert(name.to_string(), Value::String(value.to_string()));
    }
    map.insert("tags".to_string(), Value::Object(tag_map));
    Value::Object(map)
}

impl ReportTransport for ConsoleTransport {
    fn send(&self, application_id: &str, batch: AHashSet<MetricRecord>) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        for record in &batch {
            if let Err(e) = writeln!(handle, "{}", record_to_json(application_id, record)) {
                self.handle_write_error(e);
                return;
            }
        }
    }
}
