#![forbid(unsafe_code)]

mod config;
mod constants;
mod controller;
mod executor;
mod gui;
mod panel;
mod params;
mod tool;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use config::Config;
use params::Snapshot;

/// Color temperature, brightness and gamma control panel
#[derive(Debug, Parser)]
#[command(name = "screen-dimmer", version, about)]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/screen-dimmer/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Adjustment program to invoke
    #[arg(long)]
    tool: Option<String>,

    /// Adjustment method passed with -m
    #[arg(long)]
    method: Option<String>,

    /// Quiet period after the last slider move before applying
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Deadline for one tool invocation
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply settings once without opening the window
    Apply {
        #[arg(long, default_value_t = constants::params::TEMPERATURE_DEFAULT)]
        temperature: f64,
        #[arg(long, default_value_t = constants::params::BRIGHTNESS_DEFAULT)]
        brightness: f64,
        #[arg(long, default_value_t = constants::params::GAMMA_DEFAULT)]
        gamma: f64,
    },
    /// Clear all adjustments once without opening the window
    Reset,
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(tool) = &self.tool {
            config.tool = tool.clone();
        }
        if let Some(method) = &self.method {
            config.method = method.clone();
        }
        if let Some(ms) = self.debounce_ms {
            config.debounce_ms = ms;
        }
        if let Some(ms) = self.timeout_ms {
            config.timeout_ms = ms;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(config_level: &str) -> Result<()> {
    // LOG_LEVEL wins over the config file
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| config_level.to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Run a single invocation and print its status text
async fn run_once(config: &Config, command: &Command) -> Result<()> {
    let tool = config.tool();
    let invocation = match command {
        Command::Apply {
            temperature,
            brightness,
            gamma,
        } => tool.apply(&Snapshot::new(*temperature, *brightness, *gamma)),
        Command::Reset => tool.reset(),
    };

    let result = executor::run(&invocation, config.timings().deadline).await;
    let text = executor::status_text(&invocation.mode, &result);
    println!("{text}");

    if result.is_err() {
        bail!("{} failed", invocation.mode);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    init_logging(&config.log_level)?;
    info!(tool = %config.tool, method = %config.method, "Starting screen-dimmer");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("screen-dimmer-worker")
        .build()
        .context("Failed to start background runtime")?;

    match &cli.command {
        Some(command) => runtime.block_on(run_once(&config, command)),
        None => {
            let result = gui::run_gui(runtime.handle().clone(), config.tool(), config.timings());
            if let Err(err) = &result {
                error!(error = ?err, "Control panel failed");
            }
            result
        }
    }
}
