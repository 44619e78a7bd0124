use clap::Parser;
use gatehouse::SqliteStore;
use gatehouse::cli::{self, Cli};
use gatehouse::config::CONFIG;
use gatehouse::service::{Notice, Notifier};
use mimalloc::MiMalloc;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Prints notices for the person at the terminal.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        println!("{notice}");
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let args = Cli::parse();
    let cfg = &CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let database_url = args.database_url.as_deref().unwrap_or(&cfg.database_url);
    debug!(database_url = %database_url, loglevel = %cfg.loglevel);

    let store = SqliteStore::connect(database_url).await?;
    let result = cli::run(args.command, &store, &ConsoleNotifier, &mut std::io::stdout()).await;
    store.close().await;

    Ok(result?.into())
}
