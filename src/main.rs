use eventhub::server::{
    config::Config,
    error::Error,
    model::app::AppState,
    router,
    scheduler::Scheduler,
    service::sync::ProviderSyncOrchestrator,
    startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!("Server exited with error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Error> {
    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::build_http_client(&config)?;

    let orchestrator =
        ProviderSyncOrchestrator::new(db.clone(), http_client, config.max_concurrent_syncs);

    Scheduler::new(orchestrator.clone())
        .await?
        .start(&config.sync_cron)
        .await?;

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Starting server on {}", config.bind_address);

    let app = router::routes().with_state(AppState { db, orchestrator });
    axum::serve(listener, app).await?;

    Ok(())
}
