//! The ingest loop proper: pulls envelopes from a [`BusSource`], runs each
//! through dispatch inside a bounded worker pool, and fans the results out to
//! the analytic writer and the enrichment store. The sole mutator of the
//! analytic store; backpressure on the enrichment path never blocks it.
//!

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use acars_enrich::EnrichmentStore;
use acars_formats::RawMessage;
use acars_registry::Registry;
use acars_store::{AnalyticRow, AnalyticWriter};
use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::envelope::BusEnvelope;

/// Abstracts "read the next wrapped message from the bus" so the loop can be
/// exercised against an in-memory double in tests.
#[async_trait]
pub trait BusSource: Send + Sync {
    async fn recv(&mut self) -> Option<BusEnvelope>;
}

pub struct IngestConfig {
    pub worker_pool_size: usize,
    pub store_timeout: Duration,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            worker_pool_size: 8,
            store_timeout: Duration::from_secs(30),
        }
    }
}

pub struct IngestLoop {
    registry: Arc<Registry>,
    analytic_writer: Arc<dyn AnalyticWriter>,
    enrichment_store: Arc<EnrichmentStore>,
    config: IngestConfig,
    next_id: AtomicU64,
    dropped_messages: AtomicU64,
}

impl IngestLoop {
    pub fn new(
        registry: Arc<Registry>,
        analytic_writer: Arc<dyn AnalyticWriter>,
        enrichment_store: Arc<EnrichmentStore>,
        config: IngestConfig,
    ) -> Self {
        IngestLoop {
            registry,
            analytic_writer,
            enrichment_store,
            config,
            next_id: AtomicU64::new(1),
            dropped_messages: AtomicU64::new(0),
        }
    }

    pub fn dropped_messages(&self) -> u64 {
        self.dropped_messages.load(Ordering::Relaxed)
    }

    /// Run until `source` yields `None` or `cancel` fires. Each envelope is
    /// spawned as its own task once a semaphore permit is available; dispatch
    /// itself never awaits, only the store calls that follow it do.
    ///
    pub async fn run(self: Arc<Self>, mut source: Box<dyn BusSource>, cancel: CancellationToken) {
        let semaphore = Arc::new(Semaphore::new(self.config.worker_pool_size));

        loop {
            let envelope = tokio::select! {
                _ = cancel.cancelled() => break,
                envelope = source.recv() => envelope,
            };
            let Some(envelope) = envelope else { break };

            let permit = match semaphore.clone().acquire_owned().await {
                Ok(p) => p,
                Err(_) => break,
            };
            let this = self.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                let _permit = permit;
                this.handle_one(envelope, cancel).await;
            });
        }
    }

    async fn handle_one(&self, envelope: BusEnvelope, cancel: CancellationToken) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let msg = RawMessage {
            id,
            timestamp: envelope.timestamp,
            label: envelope.message.label.as_str().into(),
            text: envelope.message.text,
            icao_hex: envelope.icao_hex.as_str().into(),
            tail: envelope.tail,
            flight_hint: envelope.flight_hint,
        };

        let results = self.registry.dispatch(&msg);

        let rows = if results.is_empty() {
            vec![AnalyticRow::unparsed(&msg)]
        } else {
            results.iter().map(|r| AnalyticRow::from_result(&msg, r)).collect()
        };

        if cancel.is_cancelled() {
            return;
        }
        match tokio::time::timeout(self.config.store_timeout, self.analytic_writer.write_batch(rows)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!(error = %err, message_id = id, "analytic-store write failed");
                self.dropped_messages.fetch_add(1, Ordering::Relaxed);
            }
            Err(_) => {
                tracing::warn!(message_id = id, "analytic-store write timed out");
                self.dropped_messages.fetch_add(1, Ordering::Relaxed);
            }
        }

        if cancel.is_cancelled() {
            return;
        }
        for result in &results {
            let Some(update) = acars_enrich::extract(
                Some(msg.icao_hex.as_str()),
                msg.flight_hint.as_deref(),
                msg.timestamp,
                result,
            ) else {
                continue;
            };
            match tokio::time::timeout(self.config.store_timeout, self.enrichment_store.apply(&update)).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => tracing::warn!(error = %err, message_id = id, "enrichment-store write failed"),
                Err(_) => tracing::warn!(message_id = id, "enrichment-store write timed out"),
            }
        }
    }
}
