//! `OutreachLedger` - automated press outreach and reply tracking.
//!
//! Two subcommands against one mailbox: `send` dispatches a paced batch
//! to pending contacts, `sync` reconciles sent items and inbox replies
//! back into the contact document. Each prints a single summary line on
//! success.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use outreachledger_core::{
    ContactStore, FALLBACK_SIGNATURE, SendOptions, SettingsStore, run_outreach, run_sync,
};
use outreachledger_graph::GraphClient;
use outreachledger_oauth::{ClientCredentialsFlow, OAuthClient, Provider};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Settings file with provider credentials.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Contact document path.
    #[arg(long)]
    contacts: Option<PathBuf>,

    /// HTML signature fragment path.
    #[arg(long)]
    signature: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dispatch one outreach batch to pending contacts.
    Send,
    /// Reconcile sent items and inbox replies into the contact document.
    Sync,
}

fn default_path(file: &str) -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".outreachledger")
        .join(file)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outreachledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config_path = args.config.unwrap_or_else(|| default_path("config.json"));
    let contacts_path = args
        .contacts
        .unwrap_or_else(|| default_path("outreach-data.json"));
    let signature_path = args
        .signature
        .unwrap_or_else(|| default_path("signature.html"));

    // Settings and document checks happen before any network call.
    let settings = SettingsStore::new(&config_path).load()?;
    let store = ContactStore::new(&contacts_path);
    if !store.exists() {
        bail!("contact document not found: {}", contacts_path.display());
    }

    let provider = Provider::microsoft(&settings.tenant_id)?;
    let oauth = OAuthClient::new(settings.client_id.as_str(), provider)
        .with_client_secret(settings.client_secret.as_str());
    let token = ClientCredentialsFlow::new(oauth).fetch_token(None).await?;
    let client = GraphClient::new(settings.sender.as_str(), token.access_token)?;

    match args.command {
        Command::Send => {
            let signature = fs::read_to_string(&signature_path)
                .unwrap_or_else(|_| FALLBACK_SIGNATURE.to_string());

            let mut options = SendOptions::new(settings.sender.as_str());
            if let Some(cc) = settings.cc {
                options = options.with_cc(cc);
            }
            if let Some(subject) = settings.subject {
                options = options.with_subject(subject);
            }

            info!(mailbox = %settings.sender, "starting outreach batch");
            let report = run_outreach(&client, &store, &signature, &options).await?;

            if report.attempted == 0 {
                println!("sent_count=0 reason=no_pending_contacts");
            } else {
                println!("sent_count={}", report.sent);
            }
        }
        Command::Sync => {
            info!(mailbox = %settings.sender, "starting mailbox reconciliation");
            let report = run_sync(&client, &store).await?;
            println!("updated_contacts={}", report.total());
        }
    }

    Ok(())
}
