/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 the tsdb-report authors
 */

use std::sync::{Arc, Mutex};

use ahash::AHashSet;

use super::ReportTransport;
use crate::types::MetricRecord;

/// Captures every batch in memory. Used by tests and local debugging.
#[derive(Clone, Default)]
pub struct BufTransport {
    inner: Arc<Mutex<Vec<(String, AHashSet<MetricRecord>)>>>,
}

impl BufTransport {
    pub fn batches(&self) -> Vec<(String, AHashSet<MetricRecord>)> {
        self.inner.lock().unwrap().clone()
    }

    /// Drain and return the captured batches.
    pub fn take(&self) -> Vec<(String, AHashSet<MetricRecord>)> {
        std::mem::take(&mut *self.inner.lock().unwrap())
    }
}

impl ReportTransport for BufTransport {
    fn send(&self, application_id: &str, batch: AHashSet<MetricRecord>) {
        self.inner
            .lock()
            .unwrap()
            .push((application_id.to_string(), batch));
    }
}
