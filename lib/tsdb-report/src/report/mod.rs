/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 the tsdb-report authors
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use ahash::{AHashMap, AHashSet};
use chrono::{DateTime, Utc};
use log::debug;

use crate::config::ReporterConfig;
use crate::snapshot::{InstrumentFilter, InstrumentSnapshot, RegistrySnapshot};
use crate::transport::ReportTransport;
use crate::types::{MetricRecord, MetricTagMap, MetricValue, ParsedName, TimeUnit};

/// Converts one registry snapshot per tick into a batch of tagged records
/// and hands it to the transport.
///
/// Counters, meters, histograms and timers are delta-tracked: a tick emits
/// their records only when the cumulative count changed since the previous
/// tick. Gauges are always emitted.
pub struct SnapshotReporter<T: ReportTransport> {
    name: String,
    application_id: String,
    rate_unit: TimeUnit,
    duration_unit: TimeUnit,
    static_tags: MetricTagMap,
    filter: Arc<dyn InstrumentFilter>,
    transport: T,
    // one atomic cell per instrument name; the lock only guards cell lookup
    last_report: RwLock<AHashMap<String, Arc<AtomicU64>>>,
}

impl<T: ReportTransport> SnapshotReporter<T> {
    pub(crate) fn new(config: &ReporterConfig, transport: T) -> Self {
        SnapshotReporter {
            name: config.name.clone(),
            application_id: config.application_id.clone(),
            rate_unit: config.rate_unit,
            duration_unit: config.duration_unit,
            static_tags: config.static_tags.clone(),
            filter: config.filter.clone(),
            transport,
            last_report: RwLock::new(AHashMap::new()),
        }
    }

    /// Run one reporting tick against the given registry state.
    pub fn report(&self, registry: &RegistrySnapshot) {
        self.report_at(Utc::now(), registry)
    }

    /// Like [`SnapshotReporter::report`], with an explicit tick time. Every
    /// record of the tick carries this timestamp.
    pub fn report_at(&self, time: DateTime<Utc>, registry: &RegistrySnapshot) {
        let timestamp = time.timestamp_millis();
        let mut batch = AHashSet::new();

        for (name, value) in &registry.gauges {
            self.build_instrument(name, InstrumentSnapshot::Gauge(value), timestamp, &mut batch);
        }
        for (name, count) in &registry.counters {
            self.build_instrument(
                name,
                InstrumentSnapshot::Counter(*count),
                timestamp,
                &mut batch,
            );
        }
        for (name, histogram) in &registry.histograms {
            self.build_instrument(
                name,
                InstrumentSnapshot::Histogram(histogram),
                timestamp,
                &mut batch,
            );
        }
        for (name, meter) in &registry.meters {
            self.build_instrument(name, InstrumentSnapshot::Meter(meter), timestamp, &mut batch);
        }
        for (name, timer) in &registry.timers {
            self.build_instrument(name, InstrumentSnapshot::Timer(timer), timestamp, &mut batch);
        }

        debug!(
            "{}: sending {} records for application {}",
            self.name,
            batch.len(),
            self.application_id
        );
        self.transport.send(&self.application_id, batch);
    }

    fn build_instrument(
        &self,
        name: &str,
        snapshot: InstrumentSnapshot<'_>,
        timestamp: i64,
        batch: &mut AHashSet<MetricRecord>,
    ) {
        if !self.filter.accept(snapshot.kind(), name) {
            return;
        }

        let mut collector = RecordCollector::new(name, &self.static_tags, timestamp, batch);
        match snapshot {
            InstrumentSnapshot::Gauge(value) => {
                collector.add("value", *value);
            }
            InstrumentSnapshot::Counter(count) => {
                let delta = self.change_count(name, count);
                if delta == 0 {
                    return;
                }
                collector.add("value", MetricValue::Signed(delta));
            }
            InstrumentSnapshot::Histogram(histogram) => {
                let delta = self.change_count(name, histogram.count);
                if delta == 0 {
                    return;
                }
                let stats = &histogram.stats;
                collector.add("count", MetricValue::Signed(delta));
                collector.add("max", MetricValue::Signed(stats.max));
                collector.add("min", MetricValue::Signed(stats.min));
                collector.add("mean", MetricValue::Double(stats.mean));
                collector.add("stddev", MetricValue::Double(stats.stddev));
                collector.add("median", MetricValue::Double(stats.median));
                collector.add("p75", MetricValue::Double(stats.p75));
                collector.add("p95", MetricValue::Double(stats.p95));
                collector.add("p98", MetricValue::Double(stats.p98));
                collector.add("p99", MetricValue::Double(stats.p99));
                collector.add("p999", MetricValue::Double(stats.p999));
            }
            InstrumentSnapshot::Meter(meter) => {
                let delta = self.change_count(name, meter.count);
                if delta == 0 {
                    return;
                }
                collector.add("count", MetricValue::Signed(delta));
                collector.add(
                    "mean_rate",
                    MetricValue::Double(self.convert_rate(meter.rate.mean)),
                );
                collector.add("m1", MetricValue::Double(self.convert_rate(meter.rate.m1)));
                collector.add("m5", MetricValue::Double(self.convert_rate(meter.rate.m5)));
                collector.add("m15", MetricValue::Double(self.convert_rate(meter.rate.m15)));
            }
            InstrumentSnapshot::Timer(timer) => {
                let delta = self.change_count(name, timer.count);
                if delta == 0 {
                    return;
                }
                let stats = &timer.stats;
                collector.add("count", MetricValue::Signed(delta));
                collector.add("m15", MetricValue::Double(self.convert_rate(timer.rate.m15)));
                collector.add("m5", MetricValue::Double(self.convert_rate(timer.rate.m5)));
                collector.add("m1", MetricValue::Double(self.convert_rate(timer.rate.m1)));
                collector.add(
                    "mean_rate",
                    MetricValue::Double(self.convert_rate(timer.rate.mean)),
                );
                collector.add(
                    "max",
                    MetricValue::Double(self.convert_duration(stats.max as f64)),
                );
                collector.add(
                    "min",
                    MetricValue::Double(self.convert_duration(stats.min as f64)),
                );
                collector.add("mean", MetricValue::Double(self.convert_duration(stats.mean)));
                collector.add(
                    "stddev",
                    MetricValue::Double(self.convert_duration(stats.stddev)),
                );
                collector.add(
                    "median",
                    MetricValue::Double(self.convert_duration(stats.median)),
                );
                collector.add("p75", MetricValue::Double(self.convert_duration(stats.p75)));
                collector.add("p95", MetricValue::Double(self.convert_duration(stats.p95)));
                collector.add("p98", MetricValue::Double(self.convert_duration(stats.p98)));
                collector.add(
                    "p999",
                    MetricValue::Double(self.convert_duration(stats.p999)),
                );
            }
        }
    }

    fn convert_rate(&self, rate: f64) -> f64 {
        rate * self.rate_unit.rate_factor()
    }

    fn convert_duration(&self, duration: f64) -> f64 {
        duration * self.duration_unit.duration_factor()
    }

    /// Swap the stored cumulative count for `name` and return the signed
    /// change since the previous tick. A name seen for the first time counts
    /// from zero. A count below the previous one yields a negative delta.
    fn change_count(&self, name: &str, current: u64) -> i64 {
        let cell = self.last_report.read().unwrap().get(name).cloned();
        let cell = match cell {
            Some(cell) => cell,
            None => self
                .last_report
                .write()
                .unwrap()
                .entry(name.to_string())
                .or_default()
                .clone(),
        };
        let last = cell.swap(current, Ordering::AcqRel);
        current as i64 - last as i64
    }
}

/// Accumulates the derived records of one instrument: parses the raw name
/// once, merges static and name-derived tags (name-derived values win), and
/// stamps every record with the tick timestamp.
struct RecordCollector<'a> {
    base: String,
    tags: MetricTagMap,
    timestamp: i64,
    batch: &'a mut AHashSet<MetricRecord>,
}

impl<'a> RecordCollector<'a> {
    fn new(
        raw_name: &str,
        static_tags: &MetricTagMap,
        timestamp: i64,
        batch: &'a mut AHashSet<MetricRecord>,
    ) -> Self {
        let parsed = ParsedName::parse(raw_name);
        let mut tags = static_tags.clone();
        tags.extend(parsed.tags);
        RecordCollector {
            base: parsed.base,
            tags,
            timestamp,
            batch,
        }
    }

    fn add(&mut self, field: &str, value: MetricValue) {
        let name = if field.is_empty() {
            self.base.clone()
        } else {
            format!("{}.{field}", self.base)
        };
        self.batch.insert(MetricRecord {
            name,
            tags: self.tags.clone(),
            timestamp: self.timestamp,
            value,
        });
    }
}
