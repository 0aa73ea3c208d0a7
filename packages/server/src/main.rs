use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    info!(
        environment = %config.server.environment,
        "Configuration loaded"
    );

    let db = server::database::init_db(&config.database.url).await?;
    server::seed::seed_default_categories(&db).await?;
    server::seed::seed_owner_account(&db, config.admin.as_ref()).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, db);
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
