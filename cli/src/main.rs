// Bill Splitter command-line entry point
use anyhow::Result;
use engine::data::{JsonFileStore, KeyValueStore, MemoryStore};
use engine::SplitSession;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod config;
mod view;

use app::App;
use config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the interactive output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Bill Splitter...");

    let app_config = AppConfig::load()?;
    tracing::info!("Loaded configuration version {}.", app_config.version);

    match app_config.storage.resolve_data_file() {
        Ok(path) => {
            tracing::info!(path = %path.display(), "Using state file");
            run(JsonFileStore::new(path), app_config).await
        }
        Err(e) => {
            // Still usable, but nothing will survive a restart.
            tracing::warn!(error = %e, "No state file available, keeping data in memory only");
            run(MemoryStore::new(), app_config).await
        }
    }
}

async fn run<S: KeyValueStore>(store: S, app_config: AppConfig) -> Result<()> {
    let (session, load_error) = SplitSession::open(store).await;
    let mut app = App::new(session, app_config);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    app.run(stdin, &mut stdout, load_error).await?;

    tracing::info!("Bill Splitter finished.");
    Ok(())
}
