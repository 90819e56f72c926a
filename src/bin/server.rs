use std::{
    env,
    error::Error,
    fs::OpenOptions,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use time::Duration;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use fintrack_rs::{AppState, CorsConfig, build_router, graceful_shutdown};

/// The REST API server for fintrack_rs.
///
/// The secret used to sign bearer tokens is read from the `SECRET` environment
/// variable. An extra allowed origin may be given with the `CLIENT_URL`
/// environment variable.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The address to serve the API from.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// An origin allowed to make cross-origin requests, in addition to the
    /// defaults. May be given more than once.
    #[arg(long = "allowed-origin")]
    allowed_origins: Vec<String>,

    /// Origins ending with this suffix are allowed to make cross-origin requests.
    #[arg(long, default_value = ".vercel.app")]
    origin_suffix: String,

    /// How many days bearer tokens are valid for.
    #[arg(long, default_value_t = 30)]
    token_duration_days: i64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging()?;

    let args = Args::parse();

    let addr = SocketAddr::new(args.host, args.port);

    let secret = env::var("SECRET").map_err(|_| "The environment variable 'SECRET' must be set")?;

    let mut cors = CorsConfig::default();
    cors.allowed_origins.extend(args.allowed_origins);
    if let Ok(client_url) = env::var("CLIENT_URL") {
        cors.allowed_origins.push(client_url);
    }
    cors.origin_suffix = Some(args.origin_suffix).filter(|suffix| !suffix.is_empty());
    tracing::debug!("CORS configuration: {cors:?}");

    let connection = Connection::open(&args.db_path)?;
    let state = AppState::new(connection, &secret)?
        .with_token_duration(Duration::days(args.token_duration_days));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state, &cors));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

fn setup_logging() -> Result<(), Box<dyn Error>> {
    let stdout_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(stdout_filter);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are converted into responses.
        .on_failure(());

    router.layer(tracing_layer)
}
