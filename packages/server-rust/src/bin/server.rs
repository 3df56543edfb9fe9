//! `ClientRisk` server binary.
//!
//! Reads configuration from flags or `CLIENTRISK_*` environment variables,
//! opens the configured store, and serves the REST API until Ctrl-C.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use clientrisk_server::network::{NetworkConfig, NetworkModule, TlsConfig};
use clientrisk_server::storage::{open_store, StorageConfig};
use clientrisk_server::ClientService;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StorageKind {
    Memory,
    Postgres,
}

/// REST service for client risk profiles.
#[derive(Debug, Parser)]
#[command(name = "clientrisk-server", version)]
struct Args {
    /// Address to bind.
    #[arg(long, env = "CLIENTRISK_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on (0 picks a free port).
    #[arg(long, env = "CLIENTRISK_PORT", default_value_t = 8080)]
    port: u16,

    /// Allowed CORS origin; repeat for several. `*` allows any.
    #[arg(long = "cors-origin", env = "CLIENTRISK_CORS_ORIGINS", value_delimiter = ',', default_value = "*")]
    cors_origins: Vec<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "CLIENTRISK_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,

    /// How long to wait for in-flight requests on shutdown, in seconds.
    #[arg(long, env = "CLIENTRISK_DRAIN_TIMEOUT_SECS", default_value_t = 30)]
    drain_timeout_secs: u64,

    /// PEM certificate chain; enables TLS together with `--tls-key`.
    #[arg(long, env = "CLIENTRISK_TLS_CERT", requires = "tls_key")]
    tls_cert: Option<PathBuf>,

    /// PEM private key.
    #[arg(long, env = "CLIENTRISK_TLS_KEY", requires = "tls_cert")]
    tls_key: Option<PathBuf>,

    /// Storage backend.
    #[arg(long, env = "CLIENTRISK_STORAGE", value_enum, default_value_t = StorageKind::Memory)]
    storage: StorageKind,

    /// `PostgreSQL` connection URL, required with `--storage postgres`.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Maximum pooled database connections.
    #[arg(long, env = "CLIENTRISK_DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    database_max_connections: u32,

    /// Serve Prometheus metrics on this port.
    #[arg(long, env = "CLIENTRISK_METRICS_PORT")]
    metrics_port: Option<u16>,

    /// Log output format. Filtering follows `RUST_LOG` (default `info`).
    #[arg(long, env = "CLIENTRISK_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

impl Args {
    fn network_config(&self) -> NetworkConfig {
        let tls = match (&self.tls_cert, &self.tls_key) {
            (Some(cert_path), Some(key_path)) => Some(TlsConfig {
                cert_path: cert_path.clone(),
                key_path: key_path.clone(),
            }),
            _ => None,
        };

        NetworkConfig {
            host: self.host.clone(),
            port: self.port,
            tls,
            cors_origins: self.cors_origins.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            drain_timeout: Duration::from_secs(self.drain_timeout_secs),
        }
    }

    fn storage_config(&self) -> anyhow::Result<StorageConfig> {
        Ok(match self.storage {
            StorageKind::Memory => StorageConfig::Memory,
            StorageKind::Postgres => StorageConfig::Postgres {
                database_url: self
                    .database_url
                    .clone()
                    .context("--database-url (or DATABASE_URL) is required for postgres storage")?,
                max_connections: self.database_max_connections,
            },
        })
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    if let Some(port) = args.metrics_port {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .context("failed to install Prometheus exporter")?;
        info!(%addr, "Prometheus metrics exporter listening");
    }

    let store = open_store(&args.storage_config()?).await?;
    let service = ClientService::new(store);

    let mut network = NetworkModule::new(args.network_config(), service);
    let port = network.start().await?;
    info!(port, "ClientRisk server started");

    network.serve(shutdown_signal()).await?;
    info!("ClientRisk server stopped");
    Ok(())
}
