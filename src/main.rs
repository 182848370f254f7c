use std::net::TcpListener;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use rehab_monitor_backend::run;
use rehab_monitor_backend::config::settings::get_config;
use rehab_monitor_backend::services::{Ollama, SessionService};
use rehab_monitor_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "rehab-monitor-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    // Only try to establish connection when actually used.
    // Without a pool the persistence endpoints answer "Database not configured".
    let connection_pool = match PgPoolOptions::new()
        .max_connections(8)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(config.database.connection_string().expose_secret())
    {
        Ok(pool) => {
            if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
                tracing::error!("Failed to migrate the database: {}", e);
            }
            Some(pool)
        }
        Err(e) => {
            tracing::error!("Database Connection Error: {}", e);
            None
        }
    };

    let summarizer = Ollama::new(&config.llm)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    tracing::info!("Session summaries use model '{}'", summarizer.model_name());
    if !summarizer.health_check().await {
        tracing::warn!("Summaries will use fallback text until Ollama is reachable");
    }

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Rehab monitor listening on {}", address);

    run(
        listener,
        SessionService::new(connection_pool, summarizer)
    )?.await
}
