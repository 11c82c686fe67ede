//! CLI administration tool for mumblr.
//!
//! Provides commands for inspecting and removing entries, listing entry types,
//! and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List live entries (add --all to include drafts)
//! cargo run --bin admin -- entries list
//!
//! # Delete an entry
//! cargo run --bin admin -- entries delete 42
//!
//! # Show registered entry types and their admin forms
//! cargo run --bin admin -- types
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! `entries` and `db` read the same database settings as the server: either
//! `DATABASE_URL` or the `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`,
//! `DB_NAME` components, plus `DB_MAX_CONNECTIONS` and `DB_CONNECT_TIMEOUT`.

use mumblr::application::services::EntryService;
use mumblr::config;
use mumblr::domain::kinds::EntryTypeRegistry;
use mumblr::domain::repositories::{EntryQuery, EntryRepository};
use mumblr::infrastructure::persistence::PgEntryRepository;
use mumblr::utils::url_resolver::UrlResolver;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing mumblr.
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
    /// Manage entries
    Entries {
        #[command(subcommand)]
        action: EntryAction,
    },

    /// Show registered entry types
    Types,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Entry management subcommands.
#[derive(Subcommand)]
enum EntryAction {
    /// List entries, newest first
    List {
        /// Include drafts
        #[arg(short, long)]
        all: bool,

        /// Maximum number of entries to show
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
    },

    /// Delete an entry
    Delete {
        /// Entry ID
        id: i64,

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
}

type PgEntryService = EntryService<PgEntryRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Commands::Types = cli.command {
        show_types(&EntryTypeRegistry::with_builtin_kinds());
        return Ok(());
    }

    let config = config::load_from_env().context("Failed to load configuration")?;
    let Some(database_url) = config.database_url.as_deref() else {
        anyhow::bail!("Set DATABASE_URL or the DB_USER, DB_PASSWORD and DB_NAME components");
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Entries { action } => handle_entry_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Types => {}
    }

    Ok(())
}

/// Dispatches entry management commands.
async fn handle_entry_action(action: EntryAction, pool: &PgPool) -> Result<()> {
    let service = EntryService::new(
        Arc::new(PgEntryRepository::new(Arc::new(pool.clone()))),
        Arc::new(EntryTypeRegistry::with_builtin_kinds()),
        Arc::new(UrlResolver::default()),
    );

    match action {
        EntryAction::List { all, limit } => list_entries(&service, all, limit).await?,
        EntryAction::Delete { id, yes } => delete_entry(&service, id, yes).await?,
    }

    Ok(())
}

/// Lists entries with their status and URL.
///
/// # Output Format
///
/// ```text
/// 📋 Entries
///
///   ID   Type   Title                          Date              Status  URL
///   ──────────────────────────────────────────────────────────────────────────
///   2    text   Hello world                    2024-01-05 10:30  LIVE    /2024/jan/05/hello-world/
///   1    link   Reading list                   2024-01-04 09:12  DRAFT   /2024/jan/04/reading-list/
/// ```
async fn list_entries(service: &PgEntryService, all: bool, limit: i64) -> Result<()> {
    println!("{}", "📋 Entries".bright_blue().bold());
    println!();

    let query = if all {
        EntryQuery::all()
    } else {
        EntryQuery::live()
    };

    let page = service
        .find(query.paginate(0, limit))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list entries: {}", e))?;

    if page.items.is_empty() {
        println!("{}", "  No entries found".yellow());
        return Ok(());
    }

    println!(
        "  {:<4} {:<6} {:<30} {:<17} {:<7} {}",
        "ID".bright_white().bold(),
        "Type".bright_white().bold(),
        "Title".bright_white().bold(),
        "Date".bright_white().bold(),
        "Status".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for entry in &page.items {
        let status = if entry.published {
            "LIVE".green()
        } else {
            "DRAFT".yellow()
        };
        let url = service
            .absolute_url(entry)
            .map_err(|e| anyhow::anyhow!("Failed to resolve URL: {}", e))?;

        println!(
            "  {:<4} {:<6} {:<30} {:<17} {:<7} {}",
            entry
                .id
                .map(|id| id.to_string())
                .unwrap_or_default()
                .bright_black(),
            entry.entry_type,
            truncate(&entry.title, 30).cyan(),
            entry.date.format("%Y-%m-%d %H:%M").to_string().bright_black(),
            status,
            url
        );
    }

    println!();
    println!(
        "  Showing {} of {}",
        page.items.len().to_string().bright_white().bold(),
        page.total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes an entry after confirmation (default: No).
async fn delete_entry(service: &PgEntryService, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Entry".bright_blue().bold());
    println!();

    let entry = service
        .get_entry(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Title:    {}", entry.title.cyan());
    println!("  Slug:     {}", entry.slug.bright_black());
    println!("  Comments: {}", entry.comments.len());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this entry?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_entry(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete entry: {}", e))?;

    println!("{}", "✅ Entry deleted".green().bold());
    println!();

    Ok(())
}

/// Prints every registered entry type with its admin form fields.
fn show_types(registry: &EntryTypeRegistry) {
    println!("{}", "🧩 Entry Types".bright_blue().bold());
    println!();

    for name in registry.type_names() {
        let Some(kind) = registry.get(name) else {
            continue;
        };

        println!("  {}", name.cyan().bold());
        for field in &kind.admin_form().fields {
            let required = if field.required {
                "required".yellow()
            } else {
                "optional".bright_black()
            };
            println!("    {:<12} {:<8} {}", field.name, format!("{:?}", field.kind), required);
        }
        println!();
    }
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => check_db(pool).await,
    }
}

/// Checks connectivity and reports the server version and entry counts.
async fn check_db(pool: &PgPool) -> Result<()> {
    println!("{}", "🔍 Checking database connection...".bright_blue());
    println!();

    let version: String = sqlx::query_scalar("SELECT version()")
        .fetch_one(pool)
        .await
        .context("Failed to query database version")?;

    println!("{}", "✅ Database connection OK".green().bold());
    println!("  Version: {}", version.bright_black());

    let repo = PgEntryRepository::new(Arc::new(pool.clone()));
    let total = repo
        .count(EntryQuery::all())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count entries: {}", e))?;
    let live = repo
        .count(EntryQuery::live())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count entries: {}", e))?;

    println!(
        "  Entries: {} ({} live)",
        total.to_string().bright_green().bold(),
        live.to_string().bright_green()
    );
    println!();

    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max - 1).collect();
        format!("{cut}…")
    }
}
