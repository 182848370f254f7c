use secrecy::ExposeSecret;
use sqlx::{PgPool, PgConnection, Connection, Executor};
use std::net::TcpListener;
use uuid::Uuid;
use once_cell::sync::Lazy;

use rehab_monitor_backend::run;
use rehab_monitor_backend::config::llm::LlmSettings;
use rehab_monitor_backend::config::settings::{get_config, DatabaseSettings};
use rehab_monitor_backend::services::{Ollama, SessionService};
use rehab_monitor_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp{
    pub address: String,
    pub db_pool: Option<PgPool>
}

impl TestApp {
    pub fn pool(&self) -> &PgPool {
        self.db_pool.as_ref().expect("Test app was started without a database")
    }
}

pub fn llm_settings(base_url: &str, timeout_secs: u64) -> LlmSettings {
    let mut settings = LlmSettings::new(base_url.to_string(), "gemma3:1b".to_string());
    settings.timeout_secs = timeout_secs;
    settings
}

/// Start the app without a database; persistence endpoints answer "not configured".
pub async fn spawn_app_without_db(llm: LlmSettings) -> TestApp {
    Lazy::force(&TRACING);
    launch(None, llm)
}

/// Start the app against a freshly created and migrated Postgres database.
pub async fn spawn_app(llm: LlmSettings) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    configuration.database.db_url = None;
    let connection_pool = configure_db(&configuration.database).await;

    launch(Some(connection_pool), llm)
}

fn launch(db_pool: Option<PgPool>, llm: LlmSettings) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let summarizer = Ollama::new(&llm).expect("Failed to build Ollama client");
    let server = run(
        listener,
        SessionService::new(db_pool.clone(), summarizer),
    )
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);
    TestApp {
        address,
        db_pool
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(
            &config.connection_string_without_db()
        )
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(&config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

pub async fn post_sample(client: &reqwest::Client, address: &str, heart_rate: i32, wrist_angle: f64) {
    let response = client
        .post(&format!("{}/update-sensors", address))
        .json(&serde_json::json!({
            "heart_rate": heart_rate,
            "wrist_angle": wrist_angle
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());
}

pub async fn post_json(client: &reqwest::Client, address: &str, path: &str) -> (u16, serde_json::Value) {
    let response = client
        .post(&format!("{}{}", address, path))
        .send()
        .await
        .expect("Failed to execute request.");
    let status = response.status().as_u16();
    let body = response.json().await.expect("Failed to parse response as JSON");
    (status, body)
}

pub async fn get_json(client: &reqwest::Client, address: &str, path: &str) -> (u16, serde_json::Value) {
    let response = client
        .get(&format!("{}{}", address, path))
        .send()
        .await
        .expect("Failed to execute request.");
    let status = response.status().as_u16();
    let body = response.json().await.expect("Failed to parse response as JSON");
    (status, body)
}
