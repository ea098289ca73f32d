use std::path::Path;
use std::sync::Arc;

use acars_common::{ConfigEngine, ConfigStatus, Versioned};
use acars_enrich::EnrichmentStore;
use acars_ingest::{BusEnvelope, BusSource, IngestConfig, IngestLoop};
use acars_registry::Registry;
use acars_store::{AnalyticWriter, ClickhouseWriter};
use async_trait::async_trait;
use eyre::Result;
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Deserialize)]
struct ServeConfig {
    version: usize,
    bus_url: Option<String>,
    postgres_url: String,
    clickhouse_url: String,
    clickhouse_database: String,
    clickhouse_user: String,
    clickhouse_password: String,
    #[serde(default = "default_pool_size")]
    worker_pool_size: usize,
    #[serde(default = "default_bind")]
    bind: String,
    api_key: Option<String>,
}

fn default_pool_size() -> usize {
    8
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Versioned for ServeConfig {
    fn version(&self) -> usize {
        self.version
    }
}

const CONFIG_VERSION: usize = 1;

struct StdinBusSource {
    lines: tokio::io::Lines<BufReader<tokio::io::Stdin>>,
}

impl StdinBusSource {
    fn new() -> Self {
        StdinBusSource {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

#[async_trait]
impl BusSource for StdinBusSource {
    async fn recv(&mut self) -> Option<BusEnvelope> {
        loop {
            let line = self.lines.next_line().await.ok()??;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<BusEnvelope>(&line) {
                Ok(envelope) => return Some(envelope),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping malformed bus envelope line");
                    continue;
                }
            }
        }
    }
}

/// Run the ingest loop (stdin bus) and the HTTP API concurrently until
/// ctrl-c. Both share the same `EnrichmentStore`.
pub async fn run_serve(config_path: Option<&Path>) -> Result<()> {
    let config: ServeConfig =
        ConfigEngine::<ServeConfig>::load(config_path.and_then(|p| p.to_str()), CONFIG_VERSION)?;
    let bus_url = config
        .bus_url
        .clone()
        .ok_or_else(|| ConfigStatus::NoBusUrl(ConfigEngine::<ServeConfig>::default_file().to_string_lossy().to_string()))?;
    if bus_url != "stdin" {
        eyre::bail!("unsupported bus_url {bus_url:?}, only \"stdin\" is implemented");
    }

    let registry = Arc::new(Registry::with_default_parsers());

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.worker_pool_size as u32 + 2)
        .connect(&config.postgres_url)
        .await?;
    let enrichment_store = Arc::new(EnrichmentStore::new(pg_pool));
    enrichment_store.migrate().await?;

    let clickhouse_writer = Arc::new(
        ClickhouseWriter::connect(
            &config.clickhouse_url,
            &config.clickhouse_database,
            &config.clickhouse_user,
            &config.clickhouse_password,
            500,
        )
        .await?,
    );
    let (flush_shutdown_tx, flush_shutdown_rx) = tokio::sync::watch::channel(false);
    clickhouse_writer.spawn_flush_loop(std::time::Duration::from_secs(10), flush_shutdown_rx);
    let analytic_writer: Arc<dyn AnalyticWriter> = clickhouse_writer;

    let ingest_config = IngestConfig {
        worker_pool_size: config.worker_pool_size,
        ..Default::default()
    };
    let ingest_loop = Arc::new(IngestLoop::new(
        registry,
        analytic_writer,
        enrichment_store.clone(),
        ingest_config,
    ));

    let cancel = CancellationToken::new();
    let shutdown_signal = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        shutdown_signal.cancel();
    });

    let app = acars_api::router(enrichment_store, config.api_key.clone());
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    let api_cancel = cancel.clone();
    let api_server = axum::serve(listener, app).with_graceful_shutdown(async move {
        api_cancel.cancelled().await;
    });

    let source: Box<dyn BusSource> = Box::new(StdinBusSource::new());
    let (api_result, ()) = tokio::join!(api_server, ingest_loop.run(source, cancel));
    api_result?;

    let _ = flush_shutdown_tx.send(true);
    Ok(())
}
