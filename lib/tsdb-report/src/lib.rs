/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 the tsdb-report authors
 */

mod types;
pub use types::{
    MetricRecord, MetricTagMap, MetricTagName, MetricTagValue, MetricValue, ParseError,
    ParsedName, TimeUnit,
};

mod snapshot;
pub use snapshot::{
    AcceptAllFilter, HistogramSnapshot, InstrumentFilter, InstrumentKind, InstrumentSnapshot,
    MeterSnapshot, MetricSource, RateSnapshot, RegistrySnapshot, StatSnapshot, TimerSnapshot,
};

mod config;
pub use config::ReporterConfig;

mod report;
pub use report::SnapshotReporter;

mod transport;
pub use transport::{BufTransport, ConsoleTransport, DiscardTransport, ReportTransport};

mod runtime;
pub use runtime::ReportRuntime;
