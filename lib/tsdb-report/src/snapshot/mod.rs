/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 the tsdb-report authors
 */

use std::collections::BTreeMap;

use crate::types::MetricValue;

/// Point-in-time statistical summary of a sampled distribution. For timers
/// every field is in nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatSnapshot {
    pub max: i64,
    pub min: i64,
    pub mean: f64,
    pub stddev: f64,
    pub median: f64,
    pub p75: f64,
    pub p95: f64,
    pub p98: f64,
    pub p99: f64,
    pub p999: f64,
}

/// Per-second event rates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateSnapshot {
    pub mean: f64,
    pub m1: f64,
    pub m5: f64,
    pub m15: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HistogramSnapshot {
    /// Cumulative number of recorded values.
    pub count: u64,
    pub stats: StatSnapshot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeterSnapshot {
    /// Cumulative number of marked events.
    pub count: u64,
    pub rate: RateSnapshot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimerSnapshot {
    /// Cumulative number of recorded durations.
    pub count: u64,
    pub rate: RateSnapshot,
    pub stats: StatSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentKind {
    Gauge,
    Counter,
    Histogram,
    Meter,
    Timer,
}

/// The current state of one instrument, borrowed from a registry snapshot.
pub enum InstrumentSnapshot<'a> {
    Gauge(&'a MetricValue),
    Counter(u64),
    Histogram(&'a HistogramSnapshot),
    Meter(&'a MeterSnapshot),
    Timer(&'a TimerSnapshot),
}

impl InstrumentSnapshot<'_> {
    pub fn kind(&self) -> InstrumentKind {
        match self {
            InstrumentSnapshot::Gauge(_) => InstrumentKind::Gauge,
            InstrumentSnapshot::Counter(_) => InstrumentKind::Counter,
            InstrumentSnapshot::Histogram(_) => InstrumentKind::Histogram,
            InstrumentSnapshot::Meter(_) => InstrumentKind::Meter,
            InstrumentSnapshot::Timer(_) => InstrumentKind::Timer,
        }
    }
}

/// Read-only values of every registered instrument, one map per kind.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    pub gauges: BTreeMap<String, MetricValue>,
    pub counters: BTreeMap<String, u64>,
    pub histograms: BTreeMap<String, HistogramSnapshot>,
    pub meters: BTreeMap<String, MeterSnapshot>,
    pub timers: BTreeMap<String, TimerSnapshot>,
}

/// Registry seam polled by the report runtime once per tick.
pub trait MetricSource {
    fn snapshot(&self) -> RegistrySnapshot;
}

/// Selects which instruments participate in reporting.
pub trait InstrumentFilter: Send + Sync {
    fn accept(&self, kind: InstrumentKind, name: &str) -> bool;
}

/// The default filter: every instrument participates.
pub struct AcceptAllFilter;

impl InstrumentFilter for AcceptAllFilter {
    fn accept(&self, _kind: InstrumentKind, _name: &str) -> bool {
        true
    }
}
