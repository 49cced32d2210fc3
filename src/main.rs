use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use varta::{
    config::AppConfig,
    cycle::CycleRunner,
    http_client::{create_retryable_http_client, default_base_client},
    ledger::NotificationLedger,
    notification::{DeliveryOutcome, NotificationService, TelegramNotifier},
    provider::DtekShutdownsSource,
};

/// Default Telegram Bot API endpoint.
const TELEGRAM_API_BASE: &str = "https://api.telegram.org/";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding app.yaml; VARTA__* environment variables override
    /// file values.
    #[arg(short, long)]
    config_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs one full poll cycle: fetch, decide, deliver.
    Run,
    /// Fetches and prints the current outage state without delivering.
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber =
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();

    tracing::debug!("Loading application configuration...");
    let config = AppConfig::new(cli.config_dir.as_deref())?;
    tracing::debug!(
        provider = %config.provider_base_url,
        house = %config.house,
        "Configuration loaded."
    );

    let runner = build_runner(&config)?;

    match cli.command {
        Commands::Run => {
            let report = runner.run_once().await?;
            match report.outcome {
                DeliveryOutcome::Skipped => tracing::info!("cycle finished, nothing to deliver"),
                DeliveryOutcome::Created(record) => {
                    tracing::info!(message_id = record.message_id, "cycle finished, message created")
                }
                DeliveryOutcome::Updated(record) => {
                    tracing::info!(message_id = record.message_id, "cycle finished, message updated")
                }
            }
        }
        Commands::Check => {
            let state = runner.probe().await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
    }

    Ok(())
}

/// Wires the provider, transport, ledger and runner from the configuration.
fn build_runner(
    config: &AppConfig,
) -> Result<CycleRunner<DtekShutdownsSource, TelegramNotifier>, Box<dyn std::error::Error>> {
    // The provider client carries the session cookie the CSRF token is
    // bound to; the transport client needs no cookies.
    let provider_client = Arc::new(create_retryable_http_client(
        &config.http_retry_config,
        default_base_client(true)?,
    ));
    let source = DtekShutdownsSource::new(
        config.provider_base_url.clone(),
        &config.city,
        &config.street,
        provider_client,
        config.timezone,
    );

    let transport_client = Arc::new(create_retryable_http_client(
        &config.http_retry_config,
        default_base_client(false)?,
    ));
    let transport = TelegramNotifier::new(
        url::Url::parse(TELEGRAM_API_BASE)?,
        &config.telegram_bot_token,
        &config.telegram_chat_id,
        transport_client,
    )?;

    let ledger = NotificationLedger::new(&config.artifacts_dir);
    let notifier = NotificationService::new(transport, ledger, config.timezone);

    Ok(CycleRunner::new(source, notifier, &config.house))
}
