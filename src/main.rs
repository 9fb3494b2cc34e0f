//! # svc-log - Main Entry Point
//!
//! Command-line front end for the logging engine:
//! - `emit` logs a message (or a sequence of messages) at a severity, using
//!   the same filtering, routing and rendering a service would
//! - `pretty` turns a file of structured records back into colorized lines
//!
//! The logger is configured from `--level`/`LOG_LEVEL` and
//! `--mode`/`LOG_MODE`. The binary's own diagnostics go through `tracing`
//! and are bridged into the same logger, filtered by `RUST_LOG`.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use svc_logging::{
    cli::{Args, Command},
    LogEntry, Logger, LoggerConfig, LoggerLayer, Payload, Severity, Sink,
};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    let config = LoggerConfig::from(&args);
    let logger = Logger::from_config(&config);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(LoggerLayer::new(logger.clone()))
        .init();

    debug!(?config, "logger configured");

    if let Err(e) = run(&args.command, &logger, config.level) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(command: &Command, logger: &Logger, level: Severity) -> Result<()> {
    match command {
        Command::Emit {
            severity,
            messages,
            json,
        } => emit(logger, *severity, messages, *json),
        Command::Pretty { input } => {
            let reader: Box<dyn BufRead> = match input {
                Some(path) => {
                    let file = File::open(path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    Box::new(BufReader::new(file))
                }
                None => Box::new(BufReader::new(io::stdin())),
            };
            pretty(reader, level)
        }
    }
}

/// Logs the given messages as one entry: a single payload for one message,
/// a sequence otherwise.
fn emit(logger: &Logger, severity: Severity, messages: &[String], json: bool) -> Result<()> {
    let mut payloads = Vec::with_capacity(messages.len());
    for message in messages {
        let payload = if json {
            let value: serde_json::Value = serde_json::from_str(message)
                .with_context(|| format!("invalid JSON message: {}", message))?;
            Payload::recognize(value)
        } else {
            Payload::from(message.as_str())
        };
        payloads.push(payload);
    }

    if payloads.len() == 1 {
        logger.log_at(severity, payloads.remove(0));
    } else {
        logger.log_at(severity, payloads);
    }
    Ok(())
}

/// Re-renders structured records as interactive lines on standard output.
/// Lines that are not records are passed through unchanged.
fn pretty<R: BufRead>(reader: R, level: Severity) -> Result<()> {
    let out = Sink::stdout();
    let viewer = Logger::with_sinks(level, out.clone(), out.clone()).with_interactive(true);

    let mut passed_through = 0usize;
    for line in reader.lines() {
        let line = line.context("failed to read input")?;
        match serde_json::from_str::<LogEntry>(&line) {
            Ok(entry) => viewer.emit(&entry),
            Err(_) => {
                passed_through += 1;
                out.write_line(format!("{}\n", line).as_bytes());
            }
        }
    }

    debug!(passed_through, "finished rendering records");
    Ok(())
}
