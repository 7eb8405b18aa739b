//! CLI administration tool for shortlinks.
//!
//! Provides commands for managing API tokens, reviewing reported links,
//! viewing statistics, and performing database checks without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a client token for the chat front-end
//! cargo run --bin admin -- token create --name "Telegram bot"
//!
//! # Create an admin token
//! cargo run --bin admin -- token create --name "Moderation" --role admin
//!
//! # List and revoke tokens
//! cargo run --bin admin -- token list
//! cargo run --bin admin -- token revoke "Telegram bot"
//!
//! # Review reported links
//! cargo run --bin admin -- suspects list
//! cargo run --bin admin -- suspects resolve aB3x
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): must match the server's
//! - `BASE_URL` (optional): used to print full short URLs

use shortlinks::application::services::ModerationService;
use shortlinks::application::services::auth_service::{generate_raw_token, hash_token};
use shortlinks::domain::repositories::{
    StatsRepository, SuspectRepository, TokenRepository, TokenRole,
};
use shortlinks::infrastructure::persistence::{
    PgLinkRepository, PgStatsRepository, PgSuspectRepository, PgTokenRepository,
};
use shortlinks::utils::short_url::build_short_url;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlinks.
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
    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Review reported links
    Suspects {
        #[command(subcommand)]
        action: SuspectAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Token name (e.g., "Telegram bot", "Moderation")
        #[arg(short, long)]
        name: Option<String>,

        /// Token role: client or admin
        #[arg(short, long, default_value_t = TokenRole::Client)]
        role: TokenRole,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

/// Moderation subcommands.
#[derive(Subcommand)]
enum SuspectAction {
    /// List reported links, oldest report first
    List,

    /// Delete a reported link together with its clicks
    Resolve {
        /// Short code of the link
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

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let pool = Arc::new(pool);

    match cli.command {
        Commands::Token { action } => handle_token_action(action, pool).await?,
        Commands::Suspects { action } => handle_suspect_action(action, pool).await?,
        Commands::Stats => handle_stats(pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn base_url() -> String {
    std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: Arc<PgPool>) -> Result<()> {
    let repo = PgTokenRepository::new(pool);

    match action {
        TokenAction::Create {
            name,
            role,
            token,
            yes,
        } => create_token(&repo, name, role, token, yes).await,
        TokenAction::List => list_tokens(&repo).await,
        TokenAction::Revoke { name_or_id } => revoke_token(&repo, name_or_id).await,
    }
}

/// Creates a new API token with interactive prompts.
///
/// Only the HMAC of the token is stored, keyed by `TOKEN_SIGNING_SECRET`.
/// The raw value is printed once and cannot be retrieved later.
async fn create_token(
    repo: &PgTokenRepository,
    name: Option<String>,
    role: TokenRole,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    let secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Telegram bot")
            .interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            println!("{}", "⚠️  Using provided token value".yellow());
            t
        }
        None => {
            println!("{}", "✨ Generated new token".green());
            generate_raw_token()
        }
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Name:  {}", token_name.cyan());
    println!("  Role:  {}", role.as_str().cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.create_token(&token_name, &hash_token(&secret, &token_value), role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with role and status.
async fn list_tokens(repo: &PgTokenRepository) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<28} {:<7} {:<17} {:<17} {:<8}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Role".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(86).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<4} {:<28} {:<7} {:<17} {:<17} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            token.role.as_str(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name or ID with confirmation prompt.
///
/// Numeric input is looked up as an ID, anything else as an exact name.
async fn revoke_token(repo: &PgTokenRepository, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_name(&name_or_id).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
    .context("Token not found")?;

    if token.revoked_at.is_some() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  Role:  {}", token.role.as_str());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Dispatches moderation commands.
async fn handle_suspect_action(action: SuspectAction, pool: Arc<PgPool>) -> Result<()> {
    let moderation = ModerationService::new(
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgSuspectRepository::new(pool.clone())),
        Arc::new(PgStatsRepository::new(pool)),
        base_url(),
    );

    match action {
        SuspectAction::List => {
            println!("{}", "🚩 Reported links".bright_blue().bold());
            println!();

            let suspects = moderation
                .list_suspects()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list suspects: {}", e))?;

            if suspects.is_empty() {
                println!("{}", "  Nothing reported".green());
                return Ok(());
            }

            let base = base_url();
            for suspect in &suspects {
                println!(
                    "  {}  {}  {}",
                    suspect
                        .reported_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black(),
                    build_short_url(&base, &suspect.short_code).cyan(),
                    suspect.original_url
                );
            }

            println!();
            println!(
                "  Total: {}",
                suspects.len().to_string().bright_white().bold()
            );
            println!();
        }
        SuspectAction::Resolve { code, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete link {code} and all its clicks?"))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            moderation
                .resolve_report(&code)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to resolve {}: {}", code, e))?;

            println!("{}", "✅ Link deleted".green().bold());
        }
    }

    Ok(())
}

/// Displays system statistics.
async fn handle_stats(pool: Arc<PgPool>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let summary = PgStatsRepository::new(pool.clone())
        .summary(Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    let suspects = PgSuspectRepository::new(pool.clone())
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load suspects: {}", e))?
        .len();

    let tokens_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
            .fetch_one(pool.as_ref())
            .await?;

    println!(
        "  Users:         {}",
        summary.users.to_string().bright_green().bold()
    );
    println!(
        "  Links:         {}",
        summary.links.to_string().bright_green().bold()
    );
    println!(
        "  Expired links: {}",
        summary.expired_links.to_string().bright_yellow().bold()
    );
    println!(
        "  Clicks:        {}",
        summary.clicks.to_string().bright_green().bold()
    );
    println!(
        "  Reported:      {}",
        suspects.to_string().bright_red().bold()
    );
    println!(
        "  Active tokens: {}",
        tokens_count.to_string().bright_green().bold()
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

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
