use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use api_ingress::{ApiIngress, ApiIngressConfig};
use session_bootstrap::config::SessionBootstrapConfig;
use session_bootstrap::SessionBootstrap;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Session bootstrap server - player identities and user directory upkeep
#[derive(Parser)]
#[command(name = "bootstrap-server")]
#[command(about = "Session bootstrap server - player identities and user directory upkeep")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server (default)
    Run,
    /// Check configuration, including backend credentials
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, &config.home_dir());
    tracing::info!("Session bootstrap server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

fn module_config(config: &AppConfig) -> SessionBootstrapConfig {
    let backend = &config.backend;
    SessionBootstrapConfig {
        api_key: backend.api_key.clone(),
        api_secret: backend.api_secret.clone(),
        base_url: backend.base_url.clone(),
        request_timeout_ms: backend.request_timeout_ms,
        max_in_flight: backend.max_in_flight,
        hard_delete: backend.hard_delete,
        mark_messages_deleted: backend.mark_messages_deleted,
        reconcile_interval_sec: config.reconcile.interval_sec,
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    tracing::info!("Initializing modules...");
    let module = SessionBootstrap::init(module_config(&config))?;
    let client = module.client();

    // The directory is cleaned before the listener opens; a failed snapshot aborts startup.
    let report = client
        .reconcile()
        .await
        .context("Startup reconciliation failed")?;
    tracing::info!(
        scanned = report.scanned,
        deleted = report.deleted,
        failed = report.failures.len(),
        "Startup reconciliation finished"
    );

    match client.list_users().await {
        Ok(users) => {
            tracing::info!(count = users.len(), "Directory after clean-up");
            for user in &users {
                tracing::info!(
                    user_id = %user.id,
                    online = user.online,
                    role = user.role.as_str(),
                    "directory entry"
                );
            }
        }
        Err(e) => tracing::warn!(error = %e, "Failed to read directory after clean-up"),
    }

    let ingress = ApiIngress::new(ApiIngressConfig::from(&config.server));
    let router = ingress.build_router(module.register_rest(axum::Router::new())?);

    let cancel = modkit::cancel_on_shutdown(CancellationToken::new());
    let background = module.spawn_background(cancel.clone());

    let listener = ingress.bind().await?;
    let served = ingress.serve(listener, router, cancel.clone()).await;

    cancel.cancel();
    if let Some(handle) = background {
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "Background reconciliation task ended abnormally");
        }
    }

    tracing::info!("Session bootstrap server stopped");
    served
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.validate().context("Invalid configuration")?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
