//! CLI administration tool for url-shortener.
//!
//! Manages short links and inspects the database without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a short link
//! cargo run --bin admin -- link create https://example.com
//!
//! # Show a link with its access count
//! cargo run --bin admin -- link show aB3dE9
//!
//! # Delete a link
//! cargo run --bin admin -- link delete aB3dE9
//!
//! # View totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components, as for the server (see `config`)
//! - `BASE_URL` (optional): printed short URLs use it as their base

use url_shortener::AppError;
use url_shortener::config;
use url_shortener::application::services::ShortenerService;
use url_shortener::domain::access_event::AccessTracker;
use url_shortener::infrastructure::persistence::PgUrlRepository;
use url_shortener::utils::short_url::short_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-shortener.
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
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a short link for a URL
    Create {
        /// Absolute http(s) URL to shorten
        url: String,
    },

    /// Show a link and its access count
    Show {
        /// Short code
        code: String,
    },

    /// Permanently delete a link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

type Shortener = ShortenerService<PgUrlRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => {
            handle_link_action(action, &pool, config.base_url.as_deref()).await?
        }
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;

    Ok(())
}

fn build_shortener(pool: &PgPool) -> Shortener {
    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));
    // The CLI never resolves codes, so nothing consumes access events.
    let (tracker, _rx) = AccessTracker::channel(1);
    ShortenerService::new(repository, tracker)
}

/// Dispatches link management commands.
async fn handle_link_action(
    action: LinkAction,
    pool: &PgPool,
    base_url: Option<&str>,
) -> Result<()> {
    let shortener = build_shortener(pool);

    match action {
        LinkAction::Create { url } => create_link(&shortener, url, base_url).await?,
        LinkAction::Show { code } => show_link(&shortener, &code).await?,
        LinkAction::Delete { code, yes } => delete_link(&shortener, &code, yes).await?,
    }

    Ok(())
}

/// Creates a link and prints its short URL.
async fn create_link(
    shortener: &Shortener,
    url: String,
    base_url: Option<&str>,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let record = match shortener.create(Some(url)).await {
        Ok(record) => record,
        Err(AppError::Validation { message, .. }) => {
            println!("{} {}", "❌".red(), message.red());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to create link: {}", e)),
    };

    let base = base_url.unwrap_or("http://localhost:3000");

    println!("  Code:      {}", record.short_code.bright_yellow().bold());
    println!("  Target:    {}", record.original_url.cyan());
    println!(
        "  Short URL: {}",
        short_url(base, &record.short_code).bright_white()
    );
    println!();
    println!("{}", "✅ Link created successfully!".green().bold());
    println!();

    Ok(())
}

/// Prints one link with its counters.
///
/// # Output Format
///
/// ```text
/// 🔎 Link aB3dE9
///
///   ID:        1
///   Target:    https://example.com
///   Accesses:  42
///   Created:   2025-01-15 10:30
///   Updated:   2025-01-16 14:20
/// ```
async fn show_link(shortener: &Shortener, code: &str) -> Result<()> {
    println!("{} {}", "🔎 Link".bright_blue().bold(), code.bright_yellow());
    println!();

    let record = match shortener.stats(code).await {
        Ok(record) => record,
        Err(AppError::NotFound { .. }) => {
            println!("{}", "  Link not found".yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
    };

    println!("  ID:        {}", record.id.to_string().bright_black());
    println!("  Target:    {}", record.original_url.cyan());
    println!(
        "  Accesses:  {}",
        record.access_count.to_string().bright_green().bold()
    );
    println!(
        "  Created:   {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!(
        "  Updated:   {}",
        record
            .updated_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(shortener: &Shortener, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Short Link".bright_blue().bold());
    println!();

    let record = match shortener.stats(code).await {
        Ok(record) => record,
        Err(AppError::NotFound { .. }) => {
            println!("{}", "⚠️  Link not found".yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
    };

    println!("  Code:     {}", record.short_code.cyan());
    println!("  Target:   {}", record.original_url.bright_black());
    println!("  Accesses: {}", record.access_count.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link? This cannot be undone")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    match shortener.delete(code).await {
        Ok(()) => {
            println!();
            println!("{}", "✅ Link deleted".green().bold());
            println!();
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", "⚠️  Link was already deleted".yellow());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to delete link: {}", e)),
    }

    Ok(())
}

/// Displays system totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let shortener = build_shortener(pool);

    let links_count = shortener
        .count_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
    let accesses = shortener
        .total_accesses()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to sum accesses: {}", e))?;

    println!(
        "  Links:     {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Accesses:  {}",
        accesses.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .context("Failed to read applied migrations")?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Migrations: {}",
                migrations.to_string().bright_white()
            );
            println!();
        }
    }

    Ok(())
}
