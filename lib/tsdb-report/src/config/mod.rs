/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 the tsdb-report authors
 */

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;

use crate::report::SnapshotReporter;
use crate::snapshot::{AcceptAllFilter, InstrumentFilter};
use crate::transport::ReportTransport;
use crate::types::{MetricTagMap, MetricTagName, MetricTagValue, TimeUnit};

#[cfg(feature = "yaml")]
mod yaml;

const DEFAULT_EMIT_INTERVAL: Duration = Duration::from_secs(10);

/// Construction-time settings of a [`SnapshotReporter`].
#[derive(Clone)]
pub struct ReporterConfig {
    pub(crate) name: String,
    pub(crate) application_id: String,
    pub(crate) rate_unit: TimeUnit,
    pub(crate) duration_unit: TimeUnit,
    pub(crate) static_tags: MetricTagMap,
    pub(crate) filter: Arc<dyn InstrumentFilter>,
    pub emit_interval: Duration,
}

impl ReporterConfig {
    pub fn new<S: Into<String>>(application_id: S) -> Self {
        ReporterConfig {
            name: "snapshot-reporter".to_string(),
            application_id: application_id.into(),
            rate_unit: TimeUnit::Seconds,
            duration_unit: TimeUnit::Milliseconds,
            static_tags: MetricTagMap::default(),
            filter: Arc::new(AcceptAllFilter),
            emit_interval: DEFAULT_EMIT_INTERVAL,
        }
    }

    /// Display name used in log lines.
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    pub fn set_rate_unit(&mut self, unit: TimeUnit) {
        self.rate_unit = unit;
    }

    pub fn set_duration_unit(&mut self, unit: TimeUnit) {
        self.duration_unit = unit;
    }

    pub fn set_filter(&mut self, filter: Arc<dyn InstrumentFilter>) {
        self.filter = filter;
    }

    /// Add one tag applied to every record. A name-derived tag with the same
    /// key overrides it per record.
    pub fn add_static_tag(&mut self, name: MetricTagName, value: MetricTagValue) {
        self.static_tags.insert(name, value);
    }

    pub fn set_static_tags(&mut self, tags: MetricTagMap) {
        self.static_tags = tags;
    }

    pub fn set_emit_interval(&mut self, interval: Duration) {
        self.emit_interval = interval;
    }

    pub(crate) fn check(&self) -> anyhow::Result<()> {
        if self.application_id.is_empty() {
            return Err(anyhow!("application id is not set"));
        }
        Ok(())
    }

    pub fn build<T: ReportTransport>(&self, transport: T) -> anyhow::Result<SnapshotReporter<T>> {
        self.check()?;
        Ok(SnapshotReporter::new(self, transport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::DiscardTransport;

    #[test]
    fn defaults() {
        let config = ReporterConfig::new("app-1");
        assert_eq!(config.application_id, "app-1");
        assert_eq!(config.rate_unit, TimeUnit::Seconds);
        assert_eq!(config.duration_unit, TimeUnit::Milliseconds);
        assert!(config.static_tags.is_empty());
        assert_eq!(config.emit_interval, Duration::from_secs(10));
    }

    #[test]
    fn build_requires_application_id() {
        assert!(ReporterConfig::new("").build(DiscardTransport).is_err());
        assert!(ReporterConfig::new("app-1").build(DiscardTransport).is_ok());
    }
}
