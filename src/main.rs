// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::RngCore;
use std::cmp::Ordering;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use smoki::compare::Direction;
use smoki::signal::text_to_bits;
use smoki::{Block, RandomSource, Session, SessionConfig, SessionReport, SortedBlock};

mod cli;
use cli::display;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(e) = run(cli.command) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so `--json` output stays machine-readable.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            texts,
            seed,
            message,
            bits,
            flip_odds,
            json,
        } => {
            let config = SessionConfig {
                message_bits: bits,
                flip_odds,
                seed,
                message,
            };
            config.validate().context("invalid session options")?;

            let texts = if texts.is_empty() {
                vec![std::env::args().next().unwrap_or_else(|| "smoki".to_string())]
            } else {
                texts
            };

            match seed {
                Some(seed) => run_sessions(&texts, &config, RandomSource::seeded(seed), json),
                None => run_sessions(&texts, &config, RandomSource::os(), json),
            }
        }
        Commands::Encode { text } => {
            let bits = text_to_bits(&text).context("failed to encode text")?;
            display::print_encoding(&text, &bits);
            Ok(())
        }
        Commands::Sort {
            values,
            descending,
            numeric,
            find,
        } => {
            let direction = if descending {
                Direction::Descending
            } else {
                Direction::Ascending
            };
            if numeric {
                sort_numbers(&values, direction, find.as_deref())
            } else {
                sort_strings(values, direction, find)
            }
        }
    }
}

fn run_sessions<R: RngCore>(
    texts: &[String],
    config: &SessionConfig,
    mut rng: RandomSource<R>,
    json: bool,
) -> Result<()> {
    let mut reports: Block<SessionReport> = Block::new();
    for text in texts {
        let report = Session::run(text, config, &mut rng)
            .with_context(|| format!("session for {:?} failed", text))?;
        info!(text = %text, delivered = report.delivered, "session finished");
        reports.push(report).context("failed to record report")?;
    }

    if json {
        let out = serde_json::to_string_pretty(&reports).context("failed to serialize reports")?;
        println!("{}", out);
        return Ok(());
    }

    display::banner();
    for report in reports.iter() {
        display::print_report(report);
    }
    println!("Done!");
    Ok(())
}

fn sort_numbers(values: &[String], direction: Direction, find: Option<&str>) -> Result<()> {
    let mut block: Block<f64> = Block::new();
    for value in values {
        block
            .push(parse_number(value)?)
            .context("failed to store value")?;
    }

    let sorted = SortedBlock::sort(block, move |a: &f64, b: &f64| direction.apply(a, b));
    debug!(count = sorted.len(), "sorted numbers");

    let found = match find {
        Some(key) => Some((key, lookup_number(&sorted, key)?)),
        None => None,
    };

    let rendered: Vec<String> = sorted.as_block().iter().map(|n| n.to_string()).collect();
    display::print_sorted("SORTED", &rendered, found);
    Ok(())
}

/// Parse a sortable number. NaN compares equal to everything, so it is
/// refused both as a value and as a search key.
fn parse_number(text: &str) -> Result<f64> {
    let number: f64 = text
        .parse()
        .with_context(|| format!("not a number: {:?}", text))?;
    if number.is_nan() {
        bail!("NaN has no position in a sorted order");
    }
    Ok(number)
}

fn lookup_number<C>(sorted: &SortedBlock<f64, C>, key: &str) -> Result<bool>
where
    C: Fn(&f64, &f64) -> Ordering,
{
    Ok(sorted.contains(&parse_number(key)?))
}

/// The literal `null` stands for an absent string.
fn parse_nullable(value: String) -> Option<String> {
    if value == "null" {
        None
    } else {
        Some(value)
    }
}

fn sort_strings(values: Vec<String>, direction: Direction, find: Option<String>) -> Result<()> {
    let block: Block<Option<String>> = values.into_iter().map(parse_nullable).collect();
    let sorted = SortedBlock::sort(block, move |a: &Option<String>, b: &Option<String>| {
        direction.apply_strings(a, b)
    });
    debug!(count = sorted.len(), "sorted strings");

    let found = find.map(|key| {
        let hit = sorted.contains(&parse_nullable(key.clone()));
        (key, hit)
    });

    let rendered: Vec<String> = sorted
        .as_block()
        .iter()
        .map(|s| s.clone().unwrap_or_else(|| "null".to_string()))
        .collect();
    display::print_sorted(
        "SORTED",
        &rendered,
        found.as_ref().map(|(key, hit)| (key.as_str(), *hit)),
    );
    Ok(())
}
