//! # Opsboard Server
//!
//! Backend for a realtime restaurant operations dashboard.
//!
//! - **Login**: credential check over HTTP, argon2-hashed passwords
//! - **Dashboard socket**: WebSocket feed that pushes an initial snapshot and
//!   incremental change events to every connected screen
//! - **Store**: SQLite via sqlx, seeded with demo data on first run

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use opsboard_core::{Store, seed};
use opsboard_server::{
    infra::{app_state::AppState, config::Config},
    routes,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "opsboard-server")]
#[command(about = "Realtime restaurant operations dashboard backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server host (overrides config)
    #[arg(long, env = "OPSBOARD_HOST")]
    host: Option<String>,

    /// Server port (overrides config)
    #[arg(short, long, env = "OPSBOARD_PORT")]
    port: Option<u16>,

    /// Database URL (overrides config)
    #[arg(long, env = "OPSBOARD_DATABASE_URL")]
    database_url: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Create the schema and exit
    Migrate,
    /// Create the schema, insert the demo dataset, and exit
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(command) = cli.command {
        match command {
            Command::Db(DbCommand::Migrate) => {
                run_db_migrate(&cli.serve).await?;
                return Ok(());
            }
            Command::Db(DbCommand::Seed) => {
                run_db_seed(&cli.serve).await?;
                return Ok(());
            }
        }
    }

    run_server(cli.serve).await
}

fn load_runtime_config(args: &ServeArgs) -> Config {
    let mut config = Config::load();
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.database_url.clone() {
        config.database.url = url;
    }
    config
}

async fn run_db_migrate(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(args);
    let store = Store::connect(&config.database.url)
        .await
        .context("failed to connect to the store for migration")?;
    store
        .initialize_schema()
        .await
        .context("schema creation failed")?;
    info!("schema is up to date");
    store.close().await;
    Ok(())
}

async fn run_db_seed(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(args);
    let store = Store::connect(&config.database.url)
        .await
        .context("failed to connect to the store for seeding")?;
    store
        .initialize_schema()
        .await
        .context("schema creation failed")?;
    if seed::run(&store).await.context("seeding failed")? {
        info!("demo dataset inserted");
    } else {
        info!("store already seeded, nothing to do");
    }
    store.close().await;
    Ok(())
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(&args);

    // A lazy pool so an unreachable store does not stop the server from
    // starting; login and snapshot requests report errors until it recovers.
    let store = Store::connect_lazy(&config.database.url)
        .context("invalid database url")?;

    match store.initialize_schema().await {
        Ok(()) => match seed::run(&store).await {
            Ok(true) => info!("seeded demo dataset"),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "seeding failed, continuing"),
        },
        Err(e) => {
            warn!(error = %e, "store unavailable at startup, continuing degraded");
        }
    }

    let host = config.server.host.clone();
    let port = config.server.port;
    let state = AppState::new(Arc::new(store), Arc::new(config));
    let app = create_app(state.clone());

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Opsboard server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down");
    state.store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .merge(routes::create_api_router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn ping_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<Value>) {
    match state.store.count_users().await {
        Ok(users) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "checks": {
                    "database": { "status": "healthy", "users": users },
                    "connections": state.connections.connection_count(),
                }
            })),
        ),
        Err(e) => {
            warn!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "checks": {
                        "database": {
                            "status": "unhealthy",
                            "error": e.to_string(),
                        },
                        "connections": state.connections.connection_count(),
                    }
                })),
            )
        }
    }
}
