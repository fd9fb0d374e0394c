/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 the tsdb-report authors
 */

use super::{MetricTagMap, MetricValue};

/// One emitted data point. Records are deduplicated structurally within a
/// batch, and a batch owns its records until the transport takes them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MetricRecord {
    /// Dotted series name, e.g. `requests.p99`.
    pub name: String,
    /// Tag keys are unique; name-derived tags have already won any collision
    /// with configured static tags.
    pub tags: MetricTagMap,
    /// Milliseconds since epoch, captured once per tick.
    pub timestamp: i64,
    pub value: MetricValue,
}
