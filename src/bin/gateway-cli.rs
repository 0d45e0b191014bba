use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Submit XML documents to the audit gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// POST a document to /insert
    Insert { file: Option<PathBuf> },
    /// PUT a document to /update
    Update { file: Option<PathBuf> },
    /// DELETE with a document to /delete
    Delete { file: Option<PathBuf> },
    /// Check gateway liveness
    Health,
}

/// Read the document from `file`, or stdin when absent.
fn read_document(file: Option<PathBuf>) -> Result<String, std::io::Error> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');
    let xml = HeaderValue::from_static("application/xml");

    let res = match cli.command {
        Commands::Insert { file } => {
            client.post(format!("{}/insert", base))
                .header(CONTENT_TYPE, xml)
                .body(read_document(file)?)
                .send()
                .await?
        }
        Commands::Update { file } => {
            client.put(format!("{}/update", base))
                .header(CONTENT_TYPE, xml)
                .body(read_document(file)?)
                .send()
                .await?
        }
        Commands::Delete { file } => {
            client.delete(format!("{}/delete", base))
                .header(CONTENT_TYPE, xml)
                .body(read_document(file)?)
                .send()
                .await?
        }
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
