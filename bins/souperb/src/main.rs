//! Souperb CLI and server binary
//!
//! Entry point for initializing, validating, and starting the Souperb
//! HTTP backend.

mod app;

use anyhow::{Context, Result};
use cli::{Cli, Commands};
use config::{
    generate_default_config, load_config_or_env, save_config, validate_config, SouperbConfig,
    ValidationReport,
};
use observability::{init_logging, init_metrics, LogFormat};
use server::{HttpServer, ServerConfig, ServerExt};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::app::{build_router, Components};

const SERVICE_NAME: &str = "souperb";

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound) {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    let cli = Cli::parse_args();

    match cli.command {
        Commands::Start {
            config,
            host,
            port,
            log_format,
        } => start_command(config, host, port, log_format).await,
        Commands::Validate { config } => {
            init_logging(SERVICE_NAME, LogFormat::Pretty)?;
            validate_command(config)
        }
        Commands::Init { output } => {
            init_logging(SERVICE_NAME, LogFormat::Pretty)?;
            init_command(output)
        }
    }
}

fn apply_overrides(
    config: &mut SouperbConfig,
    host: Option<String>,
    port: Option<u16>,
    log_format: Option<String>,
) {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(format) = log_format {
        config.logging.format = format;
    }
}

fn log_report(report: &ValidationReport) {
    for default in &report.defaults_applied {
        debug!(field = %default.field, value = %default.value, "Using default");
    }
    for warning in &report.warnings {
        warn!(field = %warning.field, message = %warning.message);
    }
    for err in &report.errors {
        error!("{}", err);
    }
}

async fn start_command(
    config_path: PathBuf,
    host: Option<String>,
    port: Option<u16>,
    log_format: Option<String>,
) -> Result<()> {
    let mut config = load_config_or_env(&config_path)?;
    apply_overrides(&mut config, host, port, log_format);

    init_logging(
        SERVICE_NAME,
        LogFormat::parse(&config.logging.format).unwrap_or_default(),
    )?;
    info!(path = ?config_path, "Souperb starting...");

    let report = validate_config(&config);
    log_report(&report);
    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        anyhow::bail!("Cannot start Souperb due to configuration errors");
    }

    if config.metrics.enabled {
        init_metrics(config.metrics.port)?;
    }

    let components = Components::from_config(&config)?;
    let router = build_router(&config, components);

    let server = HttpServer::new(
        ServerConfig::new(config.server.host.clone(), config.server.port),
        router,
    );
    info!(
        host = %config.server.host,
        port = config.server.port,
        unscoped_writes = config.gateway.allow_unscoped_writes,
        "Starting HTTP server"
    );

    server.run_with_ctrl_c().await?;
    Ok(())
}

fn validate_command<P: AsRef<Path>>(config_path: P) -> Result<()> {
    info!(path = ?config_path.as_ref(), "Validating configuration");

    let config = match load_config_or_env(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!(%e, "Failed to load configuration");
            return Err(e);
        }
    };

    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.defaults_applied.is_empty() {
        println!("Defaults Applied ({}):", report.defaults_applied.len());
        for default in &report.defaults_applied {
            println!("  [info] {} = {}", default.field, default.value);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    println!("[ok] Configuration is valid!");
    println!();
    println!("Listen: {}:{}", config.server.host, config.server.port);
    println!("Store: {}", config.store.url);
    println!("Site: {}", config.site.url);
    println!("Model: {}", config.model.endpoint);
    println!(
        "Unscoped writes: {}",
        if config.gateway.allow_unscoped_writes {
            "allowed"
        } else {
            "refused"
        }
    );

    Ok(())
}

fn init_command<P: AsRef<Path>>(output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!(?output_path, "Initializing new configuration file");

    let config = generate_default_config();

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    save_config(&config, output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {:?}", output_path);
    println!();
    println!("Next steps:");
    println!("  1. Set PUBLIC_SUPABASE_URL, PUBLIC_SUPABASE_ANON_KEY, SITE_URL and HUGGING_FACE_API_KEY");
    println!(
        "  2. Run 'souperb validate --config {:?}' to check configuration",
        output_path
    );
    println!(
        "  3. Run 'souperb start --config {:?}' to start the backend",
        output_path
    );

    Ok(())
}
