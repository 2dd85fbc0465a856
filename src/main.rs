#![deny(clippy::all)]

mod error;
mod input;
mod orchestrator;
mod summarizer;
mod transcript;

use crate::input::{picker_accepts, InputCapture, StagedFile, SummaryLength};
use crate::orchestrator::UploadOrchestrator;
use crate::summarizer::SummarizerClient;
use crate::transcript::{Speaker, TranscriptEntry};
use std::path::Path;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Application configuration
#[derive(serde::Deserialize)]
struct Config {
    summarizer: SummarizerConfig,
}

#[derive(serde::Deserialize)]
struct SummarizerConfig {
    url: String,
}

/// Load configuration from embedded config.toml, with an optional
/// SUMMARIZER_URL environment override
fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    const CONFIG_TOML: &str = include_str!("../config.toml");
    let mut config: Config = toml::from_str(CONFIG_TOML)?;
    if let Ok(url) = std::env::var("SUMMARIZER_URL") {
        info!("Summarizer URL overridden from environment");
        config.summarizer.url = url;
    }
    Ok(config)
}

/// Render a transcript entry as a terminal chat line
fn render_entry(entry: &TranscriptEntry) {
    let prefix = match entry.speaker {
        Speaker::User => "You",
        Speaker::Bot => "Bot",
    };
    println!("{}: {}", prefix, entry.content);
}

fn print_help() {
    println!("Commands:");
    println!("  open <path>          choose a document (PDF or image)");
    println!("  drop <path> [...]    drag & drop one or more files");
    println!("  length short|medium|long");
    println!("  send                 upload the staged document for summarization");
    println!("  status               show the staged document and length");
    println!("  quit");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before reading environment overrides
    dotenvy::dotenv().ok();

    // Initialize tracing for structured logging
    tracing_subscriber::fmt::init();

    let config = load_config()?;
    info!("Summarizer endpoint: {}", config.summarizer.url);

    let client = SummarizerClient::new(&config.summarizer.url)?;
    let mut orchestrator = UploadOrchestrator::new(client);
    let mut capture = InputCapture::default();

    // Index of the first transcript entry not yet printed
    let mut rendered = 0;

    println!("docsum — upload a document, get a summary.");
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match command {
            "open" => {
                if !picker_accepts(rest) {
                    println!("Only PDF and image files can be selected.");
                    continue;
                }
                match StagedFile::from_path(Path::new(rest)) {
                    Ok(file) => {
                        println!("Staged: {}", file.name);
                        capture.select_from_picker(file);
                    }
                    Err(e) => println!("Could not open file: {:#}", e),
                }
            }
            "drop" => {
                capture.set_dragging(true);
                let files: Vec<StagedFile> = rest
                    .split_whitespace()
                    .filter_map(|p| match StagedFile::from_path(Path::new(p)) {
                        Ok(file) => Some(file),
                        Err(e) => {
                            warn!("Skipping dropped file: {:#}", e);
                            None
                        }
                    })
                    .collect();
                capture.select_from_drop(files);
                match capture.staged_file_name() {
                    Some(name) => println!("Staged: {}", name),
                    None => println!("Nothing dropped."),
                }
            }
            "length" => match rest.parse::<SummaryLength>() {
                Ok(length) => {
                    capture.set_length(length);
                    println!("Summary length: {}", length);
                }
                Err(e) => println!("{}", e),
            },
            "send" => {
                if orchestrator.is_busy() {
                    println!("Still summarizing the previous document…");
                    continue;
                }
                match capture.finalize() {
                    Ok(submission) => {
                        // Thinking indicator, driven by the shared busy flag
                        let busy = orchestrator.busy_handle();
                        let indicator = tokio::spawn(async move {
                            loop {
                                tokio::time::sleep(Duration::from_secs(2)).await;
                                if busy.load(Ordering::SeqCst) {
                                    println!("Thinking…");
                                }
                            }
                        });

                        if let Err(e) = orchestrator.submit(submission).await {
                            println!("{}", e);
                        }
                        indicator.abort();

                        let entries = orchestrator.transcript();
                        for entry in &entries[rendered..] {
                            render_entry(entry);
                        }
                        rendered = orchestrator.transcript_len();
                    }
                    // Blocking alert; never becomes a transcript entry
                    Err(_) => println!("Please choose a document."),
                }
            }
            "status" => {
                match capture.staged_file_name() {
                    Some(name) => println!("Staged: {}", name),
                    None => println!("No document staged."),
                }
                println!("Summary length: {}", capture.length());
                if orchestrator.is_busy() {
                    println!("Thinking…");
                }
            }
            "quit" | "exit" => break,
            "help" => print_help(),
            _ => println!("Unknown command: {} (try 'help')", command),
        }
    }

    Ok(())
}
