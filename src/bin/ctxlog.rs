use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use context_logger::config::{load_config, LoggerConfig};
use context_logger::{Level, LogFormat, Logger, RequestContext};

#[derive(Parser)]
#[command(name = "ctxlog")]
#[command(about = "Emit structured log records through the context logger", long_about = None)]
struct Cli {
    /// Logger configuration file (TOML)
    #[arg(short, long, env = "CTXLOG_CONFIG")]
    config: Option<PathBuf>,

    /// Severity threshold, overrides the config file and LOG_LEVEL
    #[arg(short, long)]
    level: Option<String>,

    /// Output format, overrides the config file
    #[arg(long, value_enum)]
    format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one record
    Emit {
        /// Record severity (panic, fatal, error, warn, info, debug, trace)
        severity: String,

        /// Message text; multiple words are joined with spaces
        #[arg(required = true)]
        message: Vec<String>,

        #[arg(long)]
        correlation_id: Option<String>,

        /// Generate a correlation ID when none is given
        #[arg(long)]
        generate_correlation_id: bool,

        #[arg(long)]
        tenant_id: Option<String>,

        #[arg(long)]
        area: Option<String>,

        #[arg(long)]
        operation: Option<String>,

        /// Extra field as key=value, repeatable
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// List severity levels and their ordinals
    Levels,
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {s:?}"))?;
    if key.is_empty() {
        return Err("field key must not be empty".to_string());
    }
    Ok((key.to_string(), value.to_string()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Diagnostics of the tool itself; records go through the configured logger.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "context_logger=warn,ctxlog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoggerConfig::default(),
    }
    .apply_env()
    .with_level_override(cli.level.as_deref());
    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::Levels => {
            for level in Level::ALL {
                println!("{}\t{}", level.ordinal(), level);
            }
        }
        Commands::Emit {
            severity,
            message,
            correlation_id,
            generate_correlation_id,
            tenant_id,
            area,
            operation,
            fields,
        } => {
            let root = config.build()?;

            let mut ctx = RequestContext::new();
            if let Some(id) = correlation_id {
                ctx = ctx.with_correlation_id(id);
            }
            if generate_correlation_id {
                ctx = ctx.with_generated_correlation_id();
            }
            if let Some(id) = tenant_id {
                ctx = ctx.with_tenant_id(id);
            }

            let mut logger = root.with_context(&ctx).with_fields(fields);
            if let Some(area) = area {
                logger = logger.set_area(&area);
            }
            if let Some(operation) = operation {
                logger = logger.set_operation(&operation);
            }

            tracing::debug!(
                correlation_id = logger.correlation_id(),
                tenant_id = logger.tenant_id(),
                "Emitting record"
            );

            let message = message.join(" ");
            match context_logger::to_log_level(&severity) {
                Level::Trace => logger.trace(message),
                Level::Debug => logger.debug(message),
                Level::Info => logger.info(message),
                Level::Warn => logger.warn(message),
                Level::Error => logger.error(message),
                Level::Fatal => logger.fatal(message),
                Level::Panic => logger.panic(message),
            }
            logger.backend().sink().flush()?;
        }
    }

    Ok(())
}
