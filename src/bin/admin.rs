//! CLI administration tool for security-dashboard.
//!
//! Checks the database and inspects or evicts cached query snapshots without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Check cache connection
//! cargo run --bin admin -- cache ping
//!
//! # Show key count and server information
//! cargo run --bin admin -- cache stats
//!
//! # List cached keys with their TTL
//! cargo run --bin admin -- cache keys "threats:*"
//!
//! # Evict cached queries
//! cargo run --bin admin -- cache invalidate threats:latest dashboard:metrics
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*`: PostgreSQL connection (for `db`)
//! - `REDIS_URL` or `REDIS_*`: Redis connection (for `cache`)

use security_dashboard::config::{Config, mask_connection_string};
use security_dashboard::infrastructure::cache::{CacheStore, RedisCache};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;

/// CLI tool for managing security-dashboard.
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
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Cache operations
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

/// Cache operation subcommands.
#[derive(Subcommand)]
enum CacheAction {
    /// Check cache connection
    Ping,

    /// Show key count and selected server information
    Stats,

    /// List cached keys
    Keys {
        /// Glob pattern (e.g. "threats:*")
        #[arg(default_value = "*")]
        pattern: String,
    },

    /// Delete cached keys
    Invalidate {
        /// Keys to delete
        #[arg(required = true)]
        keys: Vec<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &config).await?,
        Commands::Cache { action } => handle_cache_action(action, &config).await?,
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());
            println!(
                "  {}",
                mask_connection_string(&config.database_url).bright_black()
            );

            let pool = PgPool::connect(&config.database_url)
                .await
                .context("Failed to connect to database")?;

            let now: chrono::DateTime<chrono::Utc> = sqlx::query_scalar("SELECT NOW()")
                .fetch_one(&pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Server time: {}", now.to_rfc3339().bright_white());
        }
    }

    Ok(())
}

/// Dispatches cache commands against the configured Redis.
async fn handle_cache_action(action: CacheAction, config: &Config) -> Result<()> {
    let redis_url = config
        .redis_url
        .as_deref()
        .context("REDIS_URL or REDIS_HOST must be set for cache commands")?;

    let cache = RedisCache::new(redis_url)?;
    cache
        .connect()
        .await
        .with_context(|| format!("Failed to connect to {}", mask_connection_string(redis_url)))?;

    match action {
        CacheAction::Ping => {
            cache.ping().await?;
            println!("{}", "✅ Cache connection OK".green().bold());
        }
        CacheAction::Stats => show_stats(&cache).await?,
        CacheAction::Keys { pattern } => list_keys(&cache, &pattern).await?,
        CacheAction::Invalidate { keys, yes } => invalidate(&cache, keys, yes).await?,
    }

    Ok(())
}

/// INFO fields shown by `cache stats`.
const STATS_FIELDS: [&str; 5] = [
    "redis_version",
    "uptime_in_seconds",
    "connected_clients",
    "used_memory_human",
    "keyspace_hits",
];

/// Prints the key count and a few INFO fields.
async fn show_stats(cache: &RedisCache) -> Result<()> {
    println!("{}", "📊 Cache statistics".bright_blue().bold());
    println!();

    let db_size = cache.dbsize().await?;
    let info = cache.info().await?;

    println!("  {:<24} {}", "keys", db_size.to_string().bright_white().bold());
    for field in STATS_FIELDS {
        if let Some(value) = info.get(field) {
            println!("  {:<24} {}", field, value.cyan());
        }
    }
    println!();

    Ok(())
}

/// Lists keys matching `pattern` with their remaining TTL.
///
/// # Output Format
///
/// ```text
/// 🗂  Cached keys (threats:*)
///
///   Key                                      TTL
///   ─────────────────────────────────────────────────
///   threats:latest                           27s
///   threats:stats                            58s
/// ```
async fn list_keys(cache: &RedisCache, pattern: &str) -> Result<()> {
    println!(
        "{}",
        format!("🗂  Cached keys ({})", pattern).bright_blue().bold()
    );
    println!();

    let keys = cache.keys(pattern).await?;

    if keys.is_empty() {
        println!("{}", "  No keys found".yellow());
        return Ok(());
    }

    println!(
        "  {:<40} {}",
        "Key".bright_white().bold(),
        "TTL".bright_white().bold()
    );
    println!("  {}", "─".repeat(49).bright_black());

    for key in &keys {
        let ttl = match cache.ttl(key).await? {
            Some(seconds) => format!("{}s", seconds).normal(),
            None => "no expiry".bright_black(),
        };
        println!("  {:<40} {}", key.cyan(), ttl);
    }

    println!();
    println!("  Total: {}", keys.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes the given keys after confirmation (unless `--yes`).
async fn invalidate(cache: &RedisCache, keys: Vec<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Invalidate cached keys".bright_blue().bold());
    println!();
    for key in &keys {
        println!("  {}", key.cyan());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete these keys?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let mut deleted = 0;
    for key in &keys {
        deleted += cache.delete(key).await?;
    }

    println!(
        "{}",
        format!("✅ Deleted {} of {} keys", deleted, keys.len())
            .green()
            .bold()
    );

    Ok(())
}
