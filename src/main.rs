//! `logfacade` command line.
//!
//! Emits records through the process-wide logger, prints the resolved
//! configuration, or keeps running with hot reload of a config file.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;

use logfacade::config::{load_config, ConfigWatcher};
use logfacade::{Field, LogConfig, Value};

#[derive(Parser)]
#[command(name = "logfacade")]
#[command(about = "Structured JSON logging from the command line", long_about = None)]
struct Cli {
    /// Config file (TOML, or JSON when the extension is .json).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Threshold, overrides the config file.
    #[arg(short, long)]
    level: Option<String>,

    /// Output path, repeatable. Overrides the config file.
    #[arg(short, long = "output")]
    outputs: Vec<String>,

    /// Error output path, repeatable. Overrides the config file.
    #[arg(short, long = "error-output")]
    error_outputs: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one record
    Emit {
        #[arg(short, long, value_enum, default_value = "info")]
        severity: SeverityArg,

        /// Structured field as key=value, repeatable
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<Field>,

        message: String,
    },
    /// Print the resolved configuration
    Check,
    /// Reload the config file on change and emit a heartbeat
    Watch {
        #[arg(long, default_value_t = 5)]
        interval_secs: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SeverityArg {
    Debug,
    Info,
    Warn,
    Error,
    Dpanic,
    Panic,
}

/// Parse `key=value`, inferring bool, integer, and float values.
fn parse_field(raw: &str) -> Result<Field, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    if key.is_empty() {
        return Err(format!("empty key in {raw:?}"));
    }

    let value = if let Ok(b) = value.parse::<bool>() {
        Value::Bool(b)
    } else if let Ok(n) = value.parse::<i64>() {
        Value::Int(n)
    } else if let Ok(x) = value.parse::<f64>() {
        Value::Float(x)
    } else {
        Value::String(value.to_string())
    };
    Ok(Field::new(key, value))
}

/// One INFO record carrying the current threshold.
fn heartbeat() {
    logfacade::info(
        "heartbeat",
        &[Field::string("threshold", logfacade::current_level())],
    );
}

fn resolve_config(cli: &Cli) -> Result<LogConfig, logfacade::Error> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LogConfig::default(),
    };
    if let Some(level) = &cli.level {
        config.level = level.clone();
    }
    if !cli.outputs.is_empty() {
        config.output_paths = cli.outputs.clone();
    }
    if !cli.error_outputs.is_empty() {
        config.error_output_paths = cli.error_outputs.clone();
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Emit {
            severity,
            fields,
            message,
        } => {
            logfacade::configure(&config)?;
            match severity {
                SeverityArg::Debug => logfacade::debug(&message, &fields),
                SeverityArg::Info => logfacade::info(&message, &fields),
                SeverityArg::Warn => logfacade::warn(&message, &fields),
                SeverityArg::Error => logfacade::error(&message, &fields),
                SeverityArg::Dpanic => logfacade::dpanic(&message, &fields),
                SeverityArg::Panic => logfacade::panic(&message, &fields),
            }
        }
        Commands::Check => {
            let resolved = json!({
                "level": logfacade::parse_level(&config.level).as_str(),
                "output_paths": config.resolved_output_paths(),
                "error_output_paths": config.resolved_error_output_paths(),
            });
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
        Commands::Watch { interval_secs } => {
            logfacade::configure(&config)?;
            let _watcher = match &cli.config {
                Some(path) => Some(ConfigWatcher::new(path).run().map_err(logfacade::Error::from)?),
                None => None,
            };

            loop {
                heartbeat();
                std::thread::sleep(Duration::from_secs(interval_secs.max(1)));
            }
        }
    }

    Ok(())
}
