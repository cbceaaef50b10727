//! eklase - read your e-klase family mailbox from a terminal
//!
//! Prompts for portal credentials, logs in and prints the newest messages of
//! a folder. `EKLASE_FOLDER` picks the folder (inbox by default); the
//! session settings come from the `EKLASE_*` variables read by
//! [`SessionConfig::from_env`].

use anyhow::Context;
use eklase_mail::{EklaseSession, MailItem, SessionConfig};
use futures::TryStreamExt;
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Messages shown per run
const PAGE_SIZE: usize = 10;

/// Messages fetched per request
const CHUNK_SIZE: usize = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("eklase=info")))
        .init();

    info!("Starting eklase");

    let config = SessionConfig::from_env()?;
    let folder = std::env::var("EKLASE_FOLDER").unwrap_or_else(|_| "inbox".to_string());
    let session = EklaseSession::with_config(&config)?;

    let username = prompt("Username: ")?;
    let password =
        rpassword::read_password_from_tty(Some("Password: ")).context("Failed to read password")?;

    if let Err(e) = session.login(&username, &password).await {
        error!("Login failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
    info!("Listing {} newest messages of {}", PAGE_SIZE, folder);

    let mut chunks = Box::pin(session.stream_mail(&folder, 0, Some(PAGE_SIZE), CHUNK_SIZE)?);
    let mut shown = 0;
    while let Some(chunk) = chunks.try_next().await? {
        debug!("Got chunk of {} messages", chunk.len());
        shown += chunk.len();
        for raw in &chunk {
            let item = MailItem::from_raw(raw)?;
            print_item(&item);
        }
    }

    info!("Shown {} messages", shown);
    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    let mut stdout = io::stdout();
    stdout.write_all(label.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read username")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_item(item: &MailItem) {
    println!("#{} from {}", item.id, item.sender);
    println!("  {}", item.subject);
}
