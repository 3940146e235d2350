//! agentmap-browse - command-line browser for the AI agent company catalog
//!
//! Loads the catalog document once, then filters, sorts and pages it the
//! same way the card view does. Filter flags are applied in nesting order
//! (level-1, level-2, level-3, auxiliary facets, search).

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use agentmap_browse::pagination::calculate_pagination;
use agentmap_browse::{engine_from_document, render, validate, FilterEngine};
use agentmap_common::catalog::load_catalog;
use agentmap_common::config::{default_config_path, load_toml_config, resolve_data_path, TomlConfig};
use agentmap_common::{AuxFacet, Error};

/// Command-line arguments for agentmap-browse
#[derive(Parser, Debug)]
#[command(name = "agentmap-browse")]
#[command(about = "Browse the AI agent company catalog")]
#[command(version)]
struct Args {
    /// Catalog document (overrides AGENTMAP_DATA and the config file)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// TOML config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List matching records as cards
    List(ListArgs),
    /// Print the level-1/2/3 tag tree with counts
    Tree,
    /// Show the detail view of one record
    Show {
        /// Record id
        id: u64,
    },
    /// Check the catalog for data problems
    Validate {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(ClapArgs, Debug)]
struct ListArgs {
    /// Level-1 tag
    #[arg(long)]
    tag1: Option<String>,
    /// Level-2 tag (requires --tag1)
    #[arg(long)]
    tag2: Option<String>,
    /// Level-3 tag (requires --tag2)
    #[arg(long)]
    tag3: Option<String>,
    #[arg(long)]
    market: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// Chinese-product flag value
    #[arg(long)]
    chinese: Option<String>,
    /// Case-insensitive text search
    #[arg(short, long)]
    search: Option<String>,
    /// Page number (1-indexed)
    #[arg(short, long, default_value_t = 1)]
    page: usize,
    /// Cards per page (defaults to the config value)
    #[arg(long)]
    page_size: Option<usize>,
    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match args.config.clone().or_else(default_config_path) {
        Some(path) => load_toml_config(&path)?,
        None => TomlConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting agentmap-browse v{}", env!("CARGO_PKG_VERSION"));

    let data_path = resolve_data_path(args.data.as_deref(), &config);
    info!("Catalog path: {}", data_path.display());

    // A failed load is terminal: report "no data" and stop, no retry
    let document = match load_catalog(&data_path) {
        Ok(document) => document,
        Err(e) => {
            error!("Failed to load catalog: {}", e);
            eprintln!("No data: could not load {}", data_path.display());
            return Err(e).context("catalog load failed");
        }
    };

    match args.command {
        Command::List(list) => {
            let mut engine = engine_from_document(&document);
            run_list(&mut engine, &list, config.page_size)
        }
        Command::Tree => {
            let engine = engine_from_document(&document);
            for line in render::tree_lines(engine.taxonomy()) {
                println!("{}", line);
            }
            Ok(())
        }
        Command::Show { id } => {
            let engine = engine_from_document(&document);
            let record = engine
                .find(id)
                .ok_or_else(|| Error::NotFound(format!("record #{}", id)))?;
            for line in render::detail_lines(record) {
                println!("{}", line);
            }
            Ok(())
        }
        Command::Validate { json } => {
            let report = validate::validate_document(&document.companies);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for issue in &report.issues {
                    println!(
                        "{:<7} #{} {}: {}",
                        issue.severity, issue.record_id, issue.name, issue.message
                    );
                }
                println!(
                    "{} records checked, {} errors, {} warnings",
                    report.records_checked,
                    report.errors().count(),
                    report.warnings().count()
                );
            }
            if report.has_errors() {
                bail!("catalog has {} validation errors", report.errors().count());
            }
            Ok(())
        }
    }
}

fn run_list(engine: &mut FilterEngine, list: &ListArgs, default_page_size: usize) -> Result<()> {
    if let Some(tag1) = &list.tag1 {
        engine.set_level1(tag1);
    }
    if let Some(tag2) = &list.tag2 {
        engine.set_level2(tag2);
    }
    if let Some(tag3) = &list.tag3 {
        engine.set_level3(tag3);
    }
    let facets = [
        (AuxFacet::Market, &list.market),
        (AuxFacet::Country, &list.country),
        (AuxFacet::Category, &list.category),
        (AuxFacet::ChineseFlag, &list.chinese),
    ];
    for (facet, value) in facets {
        if let Some(value) = value {
            engine.set_aux_facet(facet, value);
        }
    }
    if let Some(search) = &list.search {
        engine.set_search(search);
    }

    let outcome = engine.outcome();
    let pagination = calculate_pagination(
        outcome.len(),
        list.page,
        list.page_size.unwrap_or(default_page_size),
    );

    if list.json {
        let value = render::outcome_json(outcome, &pagination);
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if outcome.is_empty() {
        println!("No matching records ({} in catalog)", outcome.total);
    }
    for record in pagination.slice(&outcome.records) {
        for line in render::card_lines(record) {
            println!("{}", line);
        }
    }
    println!(
        "\nPage {}/{} - {} of {} records",
        pagination.page,
        pagination.total_pages.max(1),
        outcome.len(),
        outcome.total
    );
    for line in render::facet_lines(outcome) {
        println!("{}", line);
    }
    Ok(())
}
