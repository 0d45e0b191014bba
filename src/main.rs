//! XML audit gateway.
//!
//! ```text
//!     Client (XML body)
//!     ──────────────────▶ POST /insert | PUT /update | DELETE /delete
//!                              │
//!                              ▼
//!                    ┌───────────────────┐
//!                    │ TransactionService│
//!                    └─────────┬─────────┘
//!                  (1) log     │     (2) upload
//!           ┌──────────────────┴──────────────────┐
//!           ▼                                     ▼
//!   transactions/transaction-<ms>.json   xml-uploads/<op>-<uuid>.xml
//!           └──────────────► object store ◄───────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use xml_audit_gateway::lifecycle::startup;

#[derive(Parser)]
#[command(name = "xml-audit-gateway", version)]
#[command(about = "Log XML transactions and store their payloads in S3", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    startup::run(args.config.as_deref()).await?;
    Ok(())
}
