//! SIGO API server binary.
//!
//! Serves the occurrence backend's auth endpoints and the SISGPO proxy.

use std::sync::Arc;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "sigo_api_server", about = "SIGO API server")]
struct Args {
    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 3333)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/sigo"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sigo_api=debug,sigo_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    info!(database_url = %args.database_url, port = args.port, "starting sigo_api_server");

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&args.database_url)
        .await?;

    // Run database migrations.
    info!("running database migrations");
    sigo_core::migrate::migrate(&pool).await?;

    // SISGPO_BASE_URL, SISGPO_SHARED_SECRET, SISGPO_SSO_TTL_SECS
    let sisgpo_config = sigo_core::sisgpo::SisgpoConfig::from_env()?;

    let config = sigo_api::config::ApiConfig {
        bind_addr: format!("127.0.0.1:{}", args.port),
        jwt_secret: sigo_core::auth::jwt::resolve_jwt_secret(),
    };

    let store: Arc<dyn sigo_core::store::UserStore> =
        Arc::new(sigo_core::store::PgUserStore::new(pool));
    let http = reqwest::Client::new();

    let state = sigo_api::AppState {
        store: store.clone(),
        sisgpo: Arc::new(sigo_core::sisgpo::Sisgpo::new(
            http.clone(),
            sisgpo_config,
            store,
        )),
        http,
        config: config.clone(),
    };

    let app = sigo_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
