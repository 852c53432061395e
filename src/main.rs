use clap::{Parser, Subcommand};
use configuration::{load_config, LoggingSettings, ServerOverrides};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The main entry point for the Mercado catalog server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables (DATABASE_URL, MERCADO__*) from .env when present.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(overrides) => {
            let mut config = load_config(overrides.config.as_deref())?;
            overrides.apply(&mut config);

            // Keep the guard alive so buffered file logs are flushed on exit.
            let _guard = init_tracing(&config.logging)?;
            tracing::info!(addr = %config.server.addr(), "Starting Mercado.");
            web_server::run_server(config).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A small product catalog with comments, served as HTML.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve(ServerOverrides),
}

// ==============================================================================
// Tracing
// ==============================================================================

/// Logs to stdout, and to daily-rolling files when a log directory is configured.
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(settings: &LoggingSettings) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&settings.level))?;

    let (file_layer, guard) = match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, &settings.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
