//! CLI administration tool for page-router.
//!
//! Inspects the route table the server would build, fetches structure
//! configurations and signs preview tokens for testing the preview endpoint
//! without the editing tool.
//!
//! # Usage
//!
//! ```bash
//! # Show the route table built from the content catalog
//! cargo run --bin admin -- routes
//!
//! # Show a structure configuration
//! cargo run --bin admin -- structure 10000
//!
//! # Sign a preview token (prompts for missing values)
//! cargo run --bin admin -- preview sign --relation page --page-id 42
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server; see `page_router::config`.
//!
//! # Features
//!
//! - **Route Inspection**: Routes, handlers and skipped pages
//! - **Structure Lookup**: Raw structure configuration as JSON
//! - **Preview Tokens**: Signed tokens with an optional lifetime
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use page_router::application::services::{PreviewTokenService, RouteTableBuilder, StructureService};
use page_router::config::{self, Config};
use page_router::domain::entities::PreviewPayload;
use page_router::infrastructure::cache::MemoryCache;
use page_router::server::content_sources;
use page_router::web::controllers::default_registry;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Select};
use std::sync::Arc;

/// CLI tool for inspecting page-router.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show the route table
    Routes,

    /// Show a structure configuration
    Structure {
        /// Structure id
        id: i64,
    },

    /// Editor preview tools
    Preview {
        #[command(subcommand)]
        action: PreviewAction,
    },
}

/// Preview subcommands.
#[derive(Subcommand)]
enum PreviewAction {
    /// Sign a preview token
    Sign {
        /// `page` or `entry`
        #[arg(short, long)]
        relation: Option<String>,

        #[arg(long)]
        page_id: Option<i64>,

        #[arg(long)]
        revision_id: Option<i64>,

        #[arg(long)]
        structure_id: Option<i64>,

        #[arg(long)]
        entry_id: Option<i64>,

        /// Rendering mode (default: `preview`)
        #[arg(short, long)]
        mode: Option<String>,

        /// Token lifetime in minutes; no expiry when omitted
        #[arg(long)]
        ttl: Option<i64>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Routes => show_routes(&config).await?,
        Commands::Structure { id } => show_structure(&config, id).await?,
        Commands::Preview { action } => handle_preview_action(action, &config)?,
    }

    Ok(())
}

/// Builds the route table the way the server does and prints it.
///
/// Failing pages are listed instead of aborting, whatever the environment.
///
/// # Output Format
///
/// ```text
/// Route Table
///
///   Methods      Path                           Handler
///   ─────────────────────────────────────────────────────────────────
///   GET|HEAD     /blog                          app::controllers::BlogController@index
/// ```
async fn show_routes(config: &Config) -> Result<()> {
    println!("{}", "🧭 Route Table".bright_blue().bold());
    println!();

    let sources = content_sources(config)?;
    let pages = sources
        .catalog
        .all_pages()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load pages: {}", e))?;

    let registry = Arc::new(default_registry(&config.controller_namespace));
    let table = RouteTableBuilder::new(registry, false)
        .build(&pages)
        .map_err(|e| anyhow::anyhow!("Failed to build route table: {}", e))?;

    if table.is_empty() {
        println!("{}", "  No routes registered".yellow());
    } else {
        println!(
            "  {:<12} {:<30} {}",
            "Methods".bright_white().bold(),
            "Path".bright_white().bold(),
            "Handler".bright_white().bold()
        );
        println!("  {}", "─".repeat(75).bright_black());

        for route in &table.routes {
            println!(
                "  {:<12} {:<30} {}",
                route.methods.join("|").bright_black(),
                route.path.cyan(),
                route.handler()
            );
        }
    }

    if !table.skipped.is_empty() {
        println!();
        println!("{}", "⚠️  Skipped pages".yellow().bold());
        for skipped in &table.skipped {
            println!(
                "  {} {} {}",
                skipped.page_id.to_string().bright_black(),
                skipped.page_url.cyan(),
                skipped.error.red()
            );
        }
    }

    println!();
    println!(
        "  Routes: {}  Pages: {}  Skipped: {}",
        table.len().to_string().bright_green().bold(),
        table.pages().len().to_string().bright_green().bold(),
        table.skipped.len().to_string().bright_yellow().bold()
    );
    println!();

    Ok(())
}

async fn show_structure(config: &Config, id: i64) -> Result<()> {
    let sources = content_sources(config)?;
    let service = StructureService::new(sources.api, Arc::new(MemoryCache::new()));

    let structure = service
        .get_structure_config(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to fetch structure {}: {}", id, e))?;

    match structure.preview_controller_action() {
        Some(target) => println!(
            "  Preview: {}",
            format!("{}@{}", target.controller, target.action).cyan()
        ),
        None => println!("{}", "  No preview controller configured".yellow()),
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&structure)?);

    Ok(())
}

fn handle_preview_action(action: PreviewAction, config: &Config) -> Result<()> {
    match action {
        PreviewAction::Sign {
            relation,
            page_id,
            revision_id,
            structure_id,
            entry_id,
            mode,
            ttl,
            yes,
        } => {
            let payload = PreviewPayload {
                relation: String::new(),
                mode,
                edit_tools: None,
                page_id,
                revision_id,
                structure_id,
                entry_id,
            };
            sign_token(config, relation, payload, ttl, yes)
        }
    }
}

/// Signs a preview token, prompting for the ids the relation needs.
///
/// # Flow
///
/// 1. Select relation (or use provided)
/// 2. Prompt for missing ids
/// 3. Display payload
/// 4. Confirm (unless `--yes` flag)
/// 5. Print token and an example request
fn sign_token(
    config: &Config,
    relation: Option<String>,
    mut payload: PreviewPayload,
    ttl: Option<i64>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Sign Preview Token".bright_blue().bold());
    println!();

    payload.relation = match relation {
        Some(r) => r,
        None => {
            let choices = ["page", "entry"];
            let index = Select::new()
                .with_prompt("Relation")
                .items(&choices)
                .default(0)
                .interact()?;
            choices[index].to_string()
        }
    };

    match payload.relation.as_str() {
        "page" => {
            if payload.page_id.is_none() {
                payload.page_id = Some(Input::new().with_prompt("Page id").interact_text()?);
            }
        }
        "entry" => {
            if payload.structure_id.is_none() {
                payload.structure_id =
                    Some(Input::new().with_prompt("Structure id").interact_text()?);
            }
            if payload.entry_id.is_none() {
                payload.entry_id = Some(Input::new().with_prompt("Entry id").interact_text()?);
            }
        }
        other => {
            println!(
                "{}",
                format!("⚠️  Relation '{}' will be rejected by the server", other).yellow()
            );
        }
    }

    if payload.mode.is_none() {
        payload.mode = Some("preview".to_string());
    }

    println!();
    println!("{}", "Payload:".bright_white().bold());
    println!("{}", serde_json::to_string_pretty(&payload)?);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Sign this payload?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token = PreviewTokenService::new(config.preview_signing_secret.clone())
        .sign(&payload, ttl.map(chrono::Duration::minutes))
        .context("Failed to sign preview token")?;

    println!();
    println!("{}", "✅ Token signed".green().bold());
    println!();
    println!("  {}", token.bright_yellow());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl \"{}/.well-known/netflex?token={}\"",
        config.base_url.trim_end_matches('/'),
        token.bright_yellow()
    );
    println!();

    Ok(())
}
