//! Boltpay CLI
//!
//! Command-line interface for the boltpay Lightning payment engine: run the
//! API server, or drive individual payment operations from the terminal.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use boltpay_api::{ApiConfig, ApiServer};
use boltpay_cache::StatusCache;
use boltpay_core::PaymentRecord;
use boltpay_engine::{EngineConfig, PaymentEngine};
use boltpay_ledger::DemoLedger;
use boltpay_upstream::{WalletApiClient, WalletApiConfig};

/// Boltpay - Lightning payments with wallet-as-a-service integration
#[derive(Parser)]
#[command(name = "boltpay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Resolve or create a wallet for a user
    Provision {
        /// Opaque user identifier
        user_ref: String,
        /// Display name for a newly created wallet
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Create an invoice to receive sats
    Invoice {
        /// Amount to request, in satoshis
        amount_sats: u64,
        /// Memo embedded in the invoice
        #[arg(short, long)]
        memo: Option<String>,
        /// Wallet id
        #[arg(short, long, env = "WALLET_ID")]
        wallet: String,
    },

    /// Pay a BOLT11 invoice
    Send {
        /// The BOLT11 invoice string
        invoice: String,
        /// Wallet id
        #[arg(short, long, env = "WALLET_ID")]
        wallet: String,
    },

    /// Check the status of a payment
    Status {
        /// Payment id
        id: String,
    },

    /// Show the wallet's available balance
    Balance {
        /// Wallet id
        #[arg(short, long, env = "WALLET_ID")]
        wallet: String,
    },

    /// List completed payments, newest first
    Transactions {
        /// Wallet id
        #[arg(short, long, env = "WALLET_ID")]
        wallet: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "boltpay=debug,info"
    } else {
        "boltpay=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(port, &bind).await,
        Commands::Provision { user_ref, name } => cmd_provision(&user_ref, name).await,
        Commands::Invoice {
            amount_sats,
            memo,
            wallet,
        } => cmd_invoice(&wallet, amount_sats, memo).await,
        Commands::Send { invoice, wallet } => cmd_send(&wallet, &invoice).await,
        Commands::Status { id } => cmd_status(&id).await,
        Commands::Balance { wallet } => cmd_balance(&wallet).await,
        Commands::Transactions { wallet } => cmd_transactions(&wallet).await,
    }
}

/// Builds a standalone engine from environment configuration.
fn build_engine() -> Result<PaymentEngine> {
    let _ = dotenvy::dotenv();

    let config = WalletApiConfig::from_env();
    let credentials_valid = config.credentials_valid();
    if !credentials_valid {
        println!(
            "{}",
            "⚠️  No valid provider credentials; operations run in demo mode.".yellow()
        );
    }

    let provider = Arc::new(WalletApiClient::new(config)?);
    Ok(PaymentEngine::new(
        provider,
        Arc::new(StatusCache::new()),
        Arc::new(DemoLedger::new()),
        credentials_valid,
        EngineConfig::default(),
    ))
}

fn print_record(record: &PaymentRecord) {
    println!("   {} {}", "Id:".dimmed(), record.id);
    println!("   {} {:?}", "State:".dimmed(), record.state);
    println!("   {} {} sats", "Amount:".dimmed(), record.amount_sats);
    if let Some(memo) = &record.memo {
        println!("   {} {}", "Memo:".dimmed(), memo);
    }
    if let Some(request) = &record.payment_request {
        println!("   {} {}", "Invoice:".dimmed(), request);
    }
    if record.is_demo {
        println!("   {} demo", "Path:".dimmed());
    }
    if let Some(warning) = &record.warning {
        println!("   {} {}", "⚠️  Warning:".yellow().bold(), warning);
    }
}

/// Run the API server
async fn cmd_serve(port: u16, bind: &str) -> Result<()> {
    println!(
        "{} {}:{}",
        "⚡ Starting boltpay API server on".cyan().bold(),
        bind,
        port
    );

    let addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .context("Invalid bind address")?;

    let server = ApiServer::new(ApiConfig::from_env())?;
    server.run(addr).await.context("Server failed")
}

/// Provision a wallet
async fn cmd_provision(user_ref: &str, name: Option<String>) -> Result<()> {
    println!("{} {}", "👛 Provisioning wallet for:".cyan().bold(), user_ref);

    let engine = build_engine()?;
    let display_name = name.unwrap_or_else(|| format!("{user_ref} wallet"));
    let wallet_id = engine.provision_wallet(user_ref, &display_name).await;

    println!("\n{}", "✅ Wallet ready:".green().bold());
    println!("   {} {}", "Wallet id:".dimmed(), wallet_id);
    println!("   {} {}", "Mode:".dimmed(), engine.mode(&wallet_id).label());

    Ok(())
}

/// Create an invoice
async fn cmd_invoice(wallet: &str, amount_sats: u64, memo: Option<String>) -> Result<()> {
    println!(
        "{} {} sats",
        "🧾 Creating invoice for".cyan().bold(),
        amount_sats
    );

    let engine = build_engine()?;
    let record = engine
        .create_invoice(wallet, amount_sats, memo)
        .await
        .context("Failed to create invoice")?;

    println!("\n{}", "✅ Invoice created:".green().bold());
    print_record(&record);

    Ok(())
}

/// Pay an invoice
async fn cmd_send(wallet: &str, invoice: &str) -> Result<()> {
    println!("{}", "💸 Sending payment...".cyan().bold());

    let engine = build_engine()?;
    let record = engine
        .send_payment(wallet, invoice)
        .await
        .context("Failed to send payment")?;

    println!("\n{}", "✅ Payment submitted:".green().bold());
    print_record(&record);

    Ok(())
}

/// Check payment status
async fn cmd_status(id: &str) -> Result<()> {
    println!("{} {}", "🔍 Checking payment:".cyan().bold(), id);

    let engine = build_engine()?;
    let record = engine
        .get_status(id)
        .await
        .context("Failed to fetch payment status")?;

    println!();
    print_record(&record);

    Ok(())
}

/// Show wallet balance
async fn cmd_balance(wallet: &str) -> Result<()> {
    let engine = build_engine()?;
    let balance = engine
        .get_balance(wallet)
        .await
        .context("Failed to fetch balance")?;

    println!(
        "{} {} sats",
        "⚡ Available balance:".green().bold(),
        balance
    );

    Ok(())
}

/// List completed payments
async fn cmd_transactions(wallet: &str) -> Result<()> {
    let engine = build_engine()?;
    let records = engine
        .list_transactions(wallet)
        .await
        .context("Failed to list transactions")?;

    if records.is_empty() {
        println!("{}", "No completed payments.".yellow());
        return Ok(());
    }

    println!(
        "{} {}",
        "📒 Completed payments:".cyan().bold(),
        records.len()
    );
    for record in &records {
        println!();
        print_record(record);
    }

    Ok(())
}
