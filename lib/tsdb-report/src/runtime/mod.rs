/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 the tsdb-report authors
 */

use std::time::Duration;

use log::debug;
use tokio::sync::oneshot;

use crate::report::SnapshotReporter;
use crate::snapshot::MetricSource;
use crate::transport::ReportTransport;

/// Drives a reporter on a fixed interval. Each tick polls the source and
/// runs one report to completion before the next tick may start; shutdown
/// performs a final emit.
pub struct ReportRuntime<S, T: ReportTransport> {
    reporter: SnapshotReporter<T>,
    source: S,
    emit_interval: Duration,
}

impl<S: MetricSource, T: ReportTransport> ReportRuntime<S, T> {
    pub fn new(reporter: SnapshotReporter<T>, source: S, emit_interval: Duration) -> Self {
        ReportRuntime {
            reporter,
            source,
            emit_interval,
        }
    }

    pub async fn into_running(self, mut quit_receiver: oneshot::Receiver<()>) {
        let mut emit_interval = tokio::time::interval(self.emit_interval);

        loop {
            tokio::select! {
                biased;

                _ = emit_interval.tick() => {
                    self.reporter.report(&self.source.snapshot());
                }
                _ = &mut quit_receiver => {
                    debug!("reporter quit, emitting final snapshot");
                    self.reporter.report(&self.source.snapshot());
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReporterConfig;
    use crate::snapshot::RegistrySnapshot;
    use crate::transport::BufTransport;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    struct CountingSource {
        hits: Arc<AtomicU64>,
    }

    impl MetricSource for CountingSource {
        fn snapshot(&self) -> RegistrySnapshot {
            let mut registry = RegistrySnapshot::default();
            registry.counters.insert(
                "hits".to_string(),
                self.hits.fetch_add(1, Ordering::Relaxed) + 1,
            );
            registry
        }
    }

    #[tokio::test]
    async fn periodic_emit_and_final_flush() {
        let transport = BufTransport::default();
        let reporter = ReporterConfig::new("app-1")
            .build(transport.clone())
            .unwrap();
        let source = CountingSource {
            hits: Arc::new(AtomicU64::new(0)),
        };
        let runtime = ReportRuntime::new(reporter, source, Duration::from_millis(10));

        let (quit_sender, quit_receiver) = oneshot::channel();
        let handle = tokio::spawn(runtime.into_running(quit_receiver));

        tokio::time::sleep(Duration::from_millis(55)).await;
        quit_sender.send(()).unwrap();
        handle.await.unwrap();

        let batches = transport.take();
        // first tick fires immediately, then every 10ms, plus the final emit
        assert!(batches.len() >= 3);
        assert_eq!(batches[0].0, "app-1");
        // the counter advances by one per tick, so every batch has the record
        for (_, batch) in &batches {
            assert_eq!(batch.len(), 1);
        }
    }

    #[tokio::test]
    async fn closed_quit_channel_stops_the_loop() {
        let transport = BufTransport::default();
        let reporter = ReporterConfig::new("app-1")
            .build(transport.clone())
            .unwrap();
        let source = CountingSource {
            hits: Arc::new(AtomicU64::new(0)),
        };
        let runtime = ReportRuntime::new(reporter, source, Duration::from_secs(3600));

        let (quit_sender, quit_receiver) = oneshot::channel::<()>();
        drop(quit_sender);
        runtime.into_running(quit_receiver).await;

        // the interval's immediate first tick may or may not have won the
        // biased race, but the final emit always runs
        assert!(!transport.take().is_empty());
    }
}
