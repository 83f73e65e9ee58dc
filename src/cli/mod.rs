//! Command-line interface for dailydose.
//!
//! Provides commands for running today's publishing pipeline, previewing the
//! selection, inspecting the execution ledger, and debugging configuration.

use std::process::ExitCode;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::adapters::{CaptionAdapter, InstagramPublisher, RendererAdapter};
use crate::calendar::CalendarStore;
use crate::config::{EnvCredentials, ResolvedConfig};
use crate::core::{Ledger, Orchestrator};

/// dailydose - Daily short-video publishing orchestrator
#[derive(Parser, Debug)]
#[command(name = "dailydose")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline for today (select, render, caption, publish, record)
    Run {
        /// Publish for a specific date instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show which content today's run would select, without side effects
    Preview {
        /// Preview a specific date instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show recent ledger entries
    History {
        /// Maximum number of entries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self, config: &ResolvedConfig) -> Result<ExitCode> {
        match self.command {
            Commands::Run { date } => run(config, date).await,
            Commands::Preview { date } => preview(config, date).await,
            Commands::History { limit } => history(config, limit).await,
            Commands::Config => show_config(config),
        }
    }
}

/// Run the daily pipeline and map the result to a process exit code
async fn run(config: &ResolvedConfig, date: Option<NaiveDate>) -> Result<ExitCode> {
    let renderer = RendererAdapter::new(&config.renderer_binary, config.timeouts.render());
    let captioner = CaptionAdapter::new(&config.captioner_binary, config.timeouts.caption());
    let publisher = InstagramPublisher::new(&config.publisher_endpoint, config.timeouts.publish())?;

    let orchestrator = Orchestrator::new(
        config,
        renderer,
        captioner,
        publisher,
        EnvCredentials::default(),
    );

    let date = date.unwrap_or_else(|| Local::now().date_naive());

    match orchestrator.run_for_date(date).await {
        Ok(report) if report.succeeded() => {
            println!(
                "\nSUCCESS: published {}\n",
                report.outcome.url.as_deref().unwrap_or("(no url reported)")
            );
            Ok(ExitCode::SUCCESS)
        }
        Ok(report) => {
            // Outcome was recorded; the run still counts as failed
            eprintln!(
                "\nFAILED: publish rejected: {}\n",
                report.outcome.error.as_deref().unwrap_or("unknown error")
            );
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            eprintln!("\nFAILED: {e}\n");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Show the selection for a date without running anything
async fn preview(config: &ResolvedConfig, date: Option<NaiveDate>) -> Result<ExitCode> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());

    let calendar = CalendarStore::load(&config.calendar).await?;
    let descriptor = calendar.select_for_date(date)?;

    println!("Date:  {}", date);
    println!("Slot:  {}", crate::calendar::day_slot(date));
    println!("Type:  {}", descriptor.kind);
    println!("Title: {}", descriptor.title);
    if !descriptor.payload.is_empty() {
        println!("Payload:");
        for (key, value) in &descriptor.payload {
            println!("  {}: {}", key, value);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// List recent ledger entries
async fn history(config: &ResolvedConfig, limit: usize) -> Result<ExitCode> {
    let ledger = Ledger::new(config.ledger_path.clone());
    let entries = ledger.load().await?;

    if entries.is_empty() {
        println!("No runs recorded");
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{:<12} {:<10} {:<30} {:<8} URL/ERROR",
        "DATE", "TYPE", "TITLE", "STATUS"
    );
    println!("{}", "-".repeat(90));

    // Most recent entries last, in append order
    let skip = entries.len().saturating_sub(limit);
    for entry in entries.iter().skip(skip) {
        let (status, detail) = if entry.success {
            ("ok", entry.post_url.as_deref().unwrap_or(""))
        } else {
            ("failed", entry.error.as_deref().unwrap_or(""))
        };
        println!(
            "{:<12} {:<10} {:<30} {:<8} {}",
            entry.date, entry.content_type, entry.content_title, status, detail
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Print the resolved configuration
fn show_config(config: &ResolvedConfig) -> Result<ExitCode> {
    println!("dailydose configuration");
    println!();
    println!(
        "Config file: {}",
        config
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home (state):  {}", config.home.display());
    println!("  Calendar:      {}", config.calendar.display());
    println!("  Output:        {}", config.output_dir.display());
    println!("  Ledger:        {}", config.ledger_path.display());
    println!("  Logs:          {}", config.log_dir.display());
    println!();
    println!("Collaborators:");
    println!("  Renderer:   {}", config.renderer_binary);
    println!("  Captioner:  {}", config.captioner_binary);
    println!("  Publisher:  {}", config.publisher_endpoint);
    println!();
    println!("Timeouts:");
    println!("  Render:   {}s", config.timeouts.render_seconds);
    println!("  Caption:  {}s", config.timeouts.caption_seconds);
    println!("  Publish:  {}s", config.timeouts.publish_seconds);

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_run_with_date() {
        let cli = Cli::parse_from(["dailydose", "run", "--date", "2026-08-07"]);
        match cli.command {
            Commands::Run { date } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 8, 7));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_history_limit() {
        let cli = Cli::parse_from(["dailydose", "history", "--limit", "3"]);
        match cli.command {
            Commands::History { limit } => assert_eq!(limit, 3),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
