//! Server: loads config from env (and `.env`), connects, applies the schema, serves the API.

use blogful_api::{app, apply_migrations, connect, AppState, Config};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.compact().init();
    } else {
        builder.pretty().init();
    }

    let pool = connect(&config).await?;
    apply_migrations(&pool).await?;

    let addr = config.bind_addr();
    let env = config.env;
    let state = AppState::new(pool, config);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(env = ?env, "listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
