use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info};

mod cli;

use cli::Cli;
use jitterbug::config::Config;
use jitterbug::{Tick, Ticker};

fn rust_log_set() -> bool {
    std::env::var_os("RUST_LOG").is_some()
}

fn setup_logging(verbose: bool) {
    // The logger passes everything; the max level does the filtering so the
    // configured level can be applied once the config has loaded
    env_logger::Builder::new()
        .filter_level(LevelFilter::Trace)
        .parse_default_env()
        .init();

    if !rust_log_set() {
        log::set_max_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info });
    }
}

fn apply_log_level(level: Option<&str>) -> Result<()> {
    // RUST_LOG, when set, overrides the configured level
    if rust_log_set() {
        return Ok(());
    }
    if let Some(level) = level {
        let filter: LevelFilter = level
            .parse()
            .context(format!("Invalid log_level '{}'", level))?;
        log::set_max_level(filter);
    }
    Ok(())
}

fn print_tick(tick: &Tick, previous: Option<&Tick>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(tick)?);
        return Ok(());
    }

    let mut line = format!("{} #{} {}", "tick".green(), tick.seq, tick.timestamp.to_rfc3339());
    if let Some(previous) = previous {
        let gap = tick.instant.duration_since(previous.instant);
        line.push_str(&format!(" (+{:?})", gap));
        let missed = tick.missed_since(previous);
        if missed > 0 {
            line.push_str(&format!(" {}", format!("missed {}", missed).red()));
        }
    }
    println!("{}", line);
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    let jitter = config.jitter.build().context("Failed to build jitter strategy")?;
    let mut ticker = Ticker::new(config.interval(), jitter);
    info!("Ticking every {:?} with {:?}", ticker.interval(), config.jitter);

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let mut received = 0u64;
    let mut previous: Option<Tick> = None;
    loop {
        tokio::select! {
            tick = ticker.recv() => {
                let Some(tick) = tick else { break };
                print_tick(&tick, previous.as_ref(), cli.json)?;
                previous = Some(tick);
                received += 1;
                if config.ticker.count.is_some_and(|count| received >= count) {
                    ticker.stop();
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping ticker");
                ticker.stop();
            }
        }
    }

    info!("Ticker stopped after {} ticks", received);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging first so config loading is reported
    setup_logging(cli.is_verbose());

    // Load configuration, then let flags override it
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    cli.apply(&mut config);
    apply_log_level(config.log_level.as_deref())?;

    info!("Starting with config from: {:?}", cli.config);

    config.validate().context("Invalid configuration")?;

    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
