//! Rent Seeker - conversational rental-search bot
//!
//! Walks each user through a short questionnaire, remembers their answers,
//! and queries a property-listing provider once the questions are answered.

mod config;
mod db;
mod listings;
mod runtime;
mod state_machine;
mod transport;

use config::Config;
use db::Database;
use runtime::{DatabaseStorage, ProductionEngine};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging; stdout belongs to the console transport
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rent_seeker=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = Config::from_env()?;

    // Ensure database directory exists
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!(path = %config.db_path.display(), "Opening database");
    let db = Database::open(&config.db_path)?;
    tracing::info!(users = db.user_count()?, "Database ready");

    let provider = listings::from_config(&config.listings)?;
    // Fail fast on bad credentials rather than on the first search
    provider.test_connection().await?;

    let (outbox_tx, outbox_rx) = mpsc::channel(256);
    let engine: ProductionEngine =
        runtime::ConversationEngine::new(DatabaseStorage::new(db), provider, outbox_tx);

    let printer = tokio::spawn(transport::console::write_outbound(
        outbox_rx,
        tokio::io::stdout(),
    ));

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown requested");
                cancel.cancel();
            }
        }
    });

    tracing::info!(user_id = %config.console_user, "Console transport ready");
    transport::console::read_inbound(
        &engine,
        config.console_user,
        BufReader::new(tokio::io::stdin()),
        cancel,
    )
    .await?;

    // Dropping the engine closes the outbox so the printer drains and exits
    drop(engine);
    printer.await??;

    tracing::info!("Stopped");
    Ok(())
}
