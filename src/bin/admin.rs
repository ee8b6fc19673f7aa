//! CLI administration tool for delivery-service.
//!
//! Provides commands for inspecting the database, pricing shipments offline
//! and removing clients without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # View record counts
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Price a shipment without storing anything
//! cargo run --bin admin -- quote --distance-km 100 --rate-per-km 3 --weight-kg 60 --rate-per-kg 1 --urgent
//!
//! # Delete a client that has no orders
//! cargo run --bin admin -- client delete 42
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`:
//!   PostgreSQL connection (not needed for `quote`)

use delivery_service::application::services::{ClientService, EntityKind, ReferentialGuard};
use delivery_service::config::{Config, mask_connection_string};
use delivery_service::domain::entities::{DeliveryStatus, DeliveryType};
use delivery_service::domain::pricing::{PricingInput, compute_delivery_cost};
use delivery_service::infrastructure::persistence::{
    PgClientRepository, PgDeliveryRepository, PgOrderRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing delivery-service.
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
    /// Show record counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Compute a delivery cost breakdown without touching the database
    Quote {
        #[arg(long)]
        distance_km: Decimal,

        #[arg(long)]
        rate_per_km: Decimal,

        #[arg(long)]
        weight_kg: Decimal,

        #[arg(long)]
        rate_per_kg: Decimal,

        /// Price as an urgent delivery
        #[arg(long)]
        urgent: bool,
    },

    /// Manage clients
    Client {
        #[command(subcommand)]
        action: ClientAction,
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

/// Client management subcommands.
#[derive(Subcommand)]
enum ClientAction {
    /// Delete a client that has no orders
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Quote {
            distance_km,
            rate_per_km,
            weight_kg,
            rate_per_kg,
            urgent,
        } => {
            let input = PricingInput {
                distance_km,
                base_rate_per_km: rate_per_km,
                weight_kg,
                base_rate_per_kg: rate_per_kg,
                delivery_type: if urgent {
                    DeliveryType::Urgent
                } else {
                    DeliveryType::Standard
                },
            };
            print_quote(&input)?;
        }
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
        Commands::Client { action } => handle_client_action(action, connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = Config::load_database_url()?;

    PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })
}

/// Prints the breakdown produced by the pricing engine.
///
/// # Output Format
///
/// ```text
/// 💰 Delivery Quote (urgent)
///
///   Distance cost:  300.00
///   Weight cost:     60.00
///   Surcharge:       72.00
///   Discount:         0.00
///   Extra fee:       15.00
///   ───────────────────────
///   Final cost:     447.00
/// ```
fn print_quote(input: &PricingInput) -> Result<()> {
    let costs = compute_delivery_cost(input).map_err(|e| anyhow::anyhow!("{e}"))?;

    println!(
        "{} ({})",
        "💰 Delivery Quote".bright_blue().bold(),
        input.delivery_type.as_str().cyan()
    );
    println!();

    let rows = [
        ("Distance cost:", costs.distance_cost),
        ("Weight cost:", costs.weight_cost),
        ("Surcharge:", costs.surcharge),
        ("Discount:", costs.discount),
        ("Extra fee:", costs.extra_fee),
    ];
    for (label, value) in rows {
        println!("  {:<15} {:>8.2}", label, value);
    }
    println!("  {}", "─".repeat(24).bright_black());
    println!(
        "  {:<15} {}",
        "Final cost:",
        format!("{:>8.2}", costs.final_cost).bright_green().bold()
    );
    println!();

    Ok(())
}

/// Displays record counts.
///
/// Shows:
/// - Total number of clients, orders and deliveries
/// - Deliveries per status
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let clients_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
        .fetch_one(pool)
        .await?;

    let orders_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?;

    let per_status: Vec<(String, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM deliveries GROUP BY status")
            .fetch_all(pool)
            .await?;

    let deliveries_count: i64 = per_status.iter().map(|(_, n)| n).sum();

    println!(
        "  Clients:       {}",
        clients_count.to_string().bright_green().bold()
    );
    println!(
        "  Orders:        {}",
        orders_count.to_string().bright_green().bold()
    );
    println!(
        "  Deliveries:    {}",
        deliveries_count.to_string().bright_green().bold()
    );

    for status in DeliveryStatus::ALL {
        let count = per_status
            .iter()
            .find(|(label, _)| label == status.as_str())
            .map(|(_, n)| *n)
            .unwrap_or(0);
        println!("    {:<13} {}", status.as_str(), count.to_string().cyan());
    }
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

            let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

/// Dispatches client management commands.
async fn handle_client_action(action: ClientAction, pool: PgPool) -> Result<()> {
    let pool = Arc::new(pool);
    let guard = Arc::new(ReferentialGuard::new(
        Arc::new(PgOrderRepository::new(pool.clone())),
        Arc::new(PgDeliveryRepository::new(pool.clone())),
    ));
    let service = ClientService::new(Arc::new(PgClientRepository::new(pool)), guard.clone());

    match action {
        ClientAction::Delete { id, yes } => delete_client(&service, &guard, id, yes).await,
    }
}

/// Deletes a client after checking for orders and asking for confirmation.
///
/// # Safety
///
/// - Refuses while orders reference the client and prints how many
/// - Requires confirmation (default: No) unless `--yes`
async fn delete_client(
    service: &ClientService,
    guard: &ReferentialGuard,
    id: i64,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Delete Client".bright_blue().bold());
    println!();

    let client = service
        .get_client(id)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!(
        "  Client:      {} {}",
        client.profile.name.cyan(),
        client.profile.surname.cyan()
    );
    println!("  National ID: {}", client.profile.national_id.bright_black());
    println!();

    let dependents = guard
        .count_dependents(EntityKind::Client, id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {e}"))?;

    if dependents > 0 {
        println!(
            "{}",
            format!("❌ Client has {dependents} orders; delete them first")
                .red()
                .bold()
        );
        return Ok(());
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this client?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_client(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete client: {e}"))?;

    println!();
    println!("{}", "✅ Client deleted successfully!".green().bold());
    println!();

    Ok(())
}
