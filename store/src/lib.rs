//! Analytic store adaptor: the sole mutator of the analytic store from the
//! ingest loop. A batching writer buffers rows in memory and flushes on
//! whichever comes first, a size threshold or an interval tick.
//!

use std::sync::Arc;
use std::time::Duration;

use acars_formats::{EnrichmentFields, ParsedMessage, RawMessage};
use async_trait::async_trait;
use clickhouse::{Client, Row};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// The fields `EnrichmentFields` exposes, in the fixed order used to build
/// `missing_fields` and `confidence`.
const TRACKED_FIELDS: &[&str] = &[
    "origin",
    "destination",
    "departure_runway",
    "arrival_runway",
    "sid",
    "squawk",
    "route",
    "pax_count",
    "pax_breakdown",
];

/// Comma-joined names of the tracked fields `fields` has nothing for, and the
/// fraction of tracked fields it did populate (1.0 if it populated all of
/// them, 0.0 for an unparsed message with no result at all).
///
fn missing_fields_and_confidence(fields: &dyn EnrichmentFields) -> (String, f32) {
    let present = [
        fields.origin().is_some(),
        fields.destination().is_some(),
        fields.departure_runway().is_some(),
        fields.arrival_runway().is_some(),
        fields.sid().is_some(),
        fields.squawk().is_some(),
        fields.route().is_some(),
        fields.pax_count().is_some(),
        fields.pax_breakdown().is_some(),
    ];
    let missing = TRACKED_FIELDS
        .iter()
        .zip(present.iter())
        .filter(|(_, present)| !**present)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(",");
    let confidence = present.iter().filter(|p| **p).count() as f32 / present.len() as f32;
    (missing, confidence)
}

/// An `EnrichmentFields` with every field absent, for a message no parser
/// matched at all.
struct NoFields;
impl EnrichmentFields for NoFields {}

/// One row destined for the analytic store, matching the external-interface
/// contract: monotonic id, timestamp, label, parser type (or `"unparsed"`),
/// flight/tail hints, origin/destination, raw text, JSON-encoded parsed
/// result, comma-joined missing-field list, parse confidence.
///
#[derive(Clone, Debug, Serialize, Deserialize, Row)]
pub struct AnalyticRow {
    pub id: u64,
    pub timestamp: i64,
    pub label: String,
    pub parser_type: String,
    pub flight: Option<String>,
    pub tail: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub raw_text: String,
    pub parsed_json: String,
    pub missing_fields: String,
    pub confidence: f32,
}

impl AnalyticRow {
    /// Build the row for a message with no parser match at all.
    pub fn unparsed(msg: &RawMessage) -> Self {
        let (missing_fields, confidence) = missing_fields_and_confidence(&NoFields);
        AnalyticRow {
            id: msg.id,
            timestamp: msg.timestamp.timestamp_millis(),
            label: msg.label.as_str().to_string(),
            parser_type: "unparsed".to_string(),
            flight: msg.flight_hint.clone(),
            tail: msg.tail.clone(),
            origin: None,
            destination: None,
            raw_text: msg.text.clone(),
            parsed_json: "null".to_string(),
            missing_fields,
            confidence,
        }
    }

    /// Build the row for one of several results dispatch produced for `msg`.
    pub fn from_result(msg: &RawMessage, result: &ParsedMessage) -> Self {
        let parsed_json = serde_json::to_string(result).unwrap_or_else(|_| "null".to_string());
        let (missing_fields, confidence) = missing_fields_and_confidence(result);
        AnalyticRow {
            id: msg.id,
            timestamp: msg.timestamp.timestamp_millis(),
            label: msg.label.as_str().to_string(),
            parser_type: result.type_tag().to_string(),
            flight: msg.flight_hint.clone(),
            tail: msg.tail.clone(),
            origin: result.origin().map(str::to_string),
            destination: result.destination().map(str::to_string),
            raw_text: msg.text.clone(),
            parsed_json,
            missing_fields,
            confidence,
        }
    }
}

#[async_trait]
pub trait AnalyticWriter: Send + Sync {
    async fn write_batch(&self, rows: Vec<AnalyticRow>) -> eyre::Result<()>;
}

const DDL: &str = r#"
create table if not exists analytic_messages (
    id UInt64,
    timestamp Int64,
    label String,
    parser_type String,
    flight Nullable(String),
    tail Nullable(String),
    origin Nullable(String),
    destination Nullable(String),
    raw_text String,
    parsed_json String,
    missing_fields String,
    confidence Float32
) ENGINE = MergeTree()
order by (parser_type, label, timestamp, id)
partition by toYYYYMM(toDateTime(intDiv(timestamp, 1000)))
"#;

/// Buffers rows in memory, flushing on whichever threshold trips first. A
/// background task owns the interval tick; `write_batch` only appends and
/// flushes eagerly once the size threshold is reached.
///
pub struct ClickhouseWriter {
    client: Client,
    buffer: Arc<Mutex<Vec<AnalyticRow>>>,
    flush_size: usize,
}

impl ClickhouseWriter {
    pub async fn connect(url: &str, database: &str, user: &str, password: &str, flush_size: usize) -> eyre::Result<Self> {
        let client = Client::default()
            .with_url(url)
            .with_database(database)
            .with_user(user)
            .with_password(password);
        client.query(DDL).execute().await?;
        Ok(ClickhouseWriter {
            client,
            buffer: Arc::new(Mutex::new(Vec::new())),
            flush_size,
        })
    }

    async fn flush_locked(&self, rows: &mut Vec<AnalyticRow>) -> eyre::Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let mut insert = self.client.insert("analytic_messages")?;
        for row in rows.iter() {
            insert.write(row).await?;
        }
        insert.end().await?;
        rows.clear();
        Ok(())
    }

    /// Spawn the interval-driven flush loop. Runs until `shutdown` resolves.
    pub fn spawn_flush_loop(self: &Arc<Self>, interval: Duration, mut shutdown: tokio::sync::watch::Receiver<bool>) {
        let writer = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let mut buf = writer.buffer.lock().await;
                        if let Err(err) = writer.flush_locked(&mut buf).await {
                            tracing::warn!(error = %err, "periodic analytic-store flush failed");
                        }
                    }
                    _ = shutdown.changed() => {
                        if *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }
        });
    }
}

#[async_trait]
impl AnalyticWriter for ClickhouseWriter {
    async fn write_batch(&self, rows: Vec<AnalyticRow>) -> eyre::Result<()> {
        let mut buffer = self.buffer.lock().await;
        buffer.extend(rows);
        if buffer.len() >= self.flush_size {
            self.flush_locked(&mut buffer).await?;
        }
        Ok(())
    }
}
