use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use scribe::{
    app, config::Settings, notes::staging::Staging, storage::helpers::setup_storage, AppState,
};
use sea_orm::{ConnectOptions, Database};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("scribe=debug,tower_http=debug")),
        )
        .init();

    let settings = Settings::from_env().context("invalid configuration")?;

    let mut options = ConnectOptions::new(settings.database_url.clone());
    options.max_connections(5).sqlx_logging(false);

    let db = Database::connect(options).await.context("db connection")?;
    Migrator::up(&db, None).await.context("create tables")?;

    let staging = Staging::new(settings.upload_dir.clone(), settings.download_dir.clone());
    staging.ensure().await.context("staging directories")?;

    let state = AppState {
        db: db.clone(),
        storage: setup_storage(&settings.storage),
        staging,
    };

    let app = app(state, settings.max_upload_bytes);

    tracing::info!("listening on {}", settings.listen_addr);

    axum::Server::bind(&settings.listen_addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("start server")?;

    db.close().await.context("close db connection")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {}", err);
        std::future::pending::<()>().await;
    }

    tracing::info!("shutting down");
}
