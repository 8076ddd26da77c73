//! brain-cli — capture and browse thoughts through the Second Brain HTTP API
//!
//! # Subcommands
//! - `capture <content> [--title] [--modality] [--tag ...] [--source-url]` — ingest a thought
//! - `list [--folder <key>] [-n <limit>]`                                  — list thoughts
//! - `folders`                                                             — show the folder registry
//! - `status`                                                              — show server health

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";
const DEFAULT_LIMIT: usize = 50;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "brain-cli", version, about = "Second Brain capture CLI")]
struct Cli {
    /// Second Brain HTTP server URL (overrides BRAIN_HTTP_URL env var)
    #[arg(long, env = "BRAIN_HTTP_URL", default_value = DEFAULT_SERVER)]
    server: String,

    /// Print raw JSON responses
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Capture a thought; the server picks the folder
    Capture {
        /// Text content of the thought
        content: String,

        #[arg(long)]
        title: Option<String>,

        /// text | image | link | voice
        #[arg(short, long, default_value = "text")]
        modality: String,

        /// Tag to attach (repeatable)
        #[arg(short = 't', long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        source_url: Option<String>,
    },

    /// List captured thoughts
    List {
        /// Only thoughts routed to this folder
        #[arg(short, long)]
        folder: Option<String>,

        /// Maximum number of thoughts to return
        #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Show the folder registry
    Folders,

    /// Show server status
    Status,
}

// ============================================================================
// API Types
// ============================================================================

/// Body for POST /api/ingest
#[derive(Debug, Serialize)]
pub struct CaptureRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub modality: String,
    pub source_url: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CaptureResponse {
    pub id: String,
    pub folder: String,
}

#[derive(Debug, Deserialize)]
pub struct ThoughtItem {
    pub id: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub modality: String,
    pub folder: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub source_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListResponse {
    pub items: Vec<ThoughtItem>,
}

#[derive(Debug, Deserialize)]
pub struct FolderItem {
    pub key: String,
    pub name: String,
    pub priority: u8,
}

/// One-line summary of a thought for terminal output.
pub fn format_item(item: &ThoughtItem) -> String {
    let label = item
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .or(item.content.as_deref())
        .or(item.source_url.as_deref())
        .unwrap_or("(no content)");
    let label: String = label.lines().next().unwrap_or("").chars().take(60).collect();

    let mut line = format!("[{}] {} ({}) {}", item.folder, label, item.modality, item.id);
    if !item.tags.is_empty() {
        line.push_str(&format!(" #{}", item.tags.join(" #")));
    }
    line
}

// ============================================================================
// HTTP Client Calls
// ============================================================================

fn client(timeout_secs: u64) -> anyhow::Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()?)
}

/// Send a request and return the JSON body, or an error carrying the server's message.
fn send_json(req: reqwest::blocking::RequestBuilder) -> anyhow::Result<serde_json::Value> {
    let resp = req.send()?;
    let status = resp.status();
    let body: serde_json::Value = resp.json().unwrap_or_default();
    if !status.is_success() {
        let msg = body["error"].as_str().unwrap_or("no error message");
        anyhow::bail!("server returned {}: {}", status, msg);
    }
    Ok(body)
}

fn do_capture(server: &str, req: CaptureRequest, json_output: bool) -> anyhow::Result<()> {
    let url = format!("{}/api/ingest", server);
    let body = send_json(client(30)?.post(&url).json(&req))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let captured: CaptureResponse = serde_json::from_value(body)?;
    println!("Captured {} → {}", captured.id, captured.folder);
    Ok(())
}

fn do_list(server: &str, folder: Option<&str>, limit: usize, json_output: bool) -> anyhow::Result<()> {
    let url = format!("{}/api/thoughts", server);
    let mut query = vec![("limit", limit.to_string())];
    if let Some(f) = folder {
        query.push(("folder", f.to_string()));
    }
    let body = send_json(client(30)?.get(&url).query(&query))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let list: ListResponse = serde_json::from_value(body)?;
    if list.items.is_empty() {
        eprintln!("No thoughts found");
        return Ok(());
    }
    for item in &list.items {
        println!("{}", format_item(item));
    }
    Ok(())
}

fn do_folders(server: &str, json_output: bool) -> anyhow::Result<()> {
    let url = format!("{}/api/folders", server);
    let body = send_json(client(10)?.get(&url))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let folders: Vec<FolderItem> = serde_json::from_value(body)?;
    for f in folders {
        println!("{:<6} {:<8} priority {}", f.key, f.name, f.priority);
    }
    Ok(())
}

/// Show the server status by calling GET /health.
fn do_status(server: &str, json_output: bool) -> anyhow::Result<()> {
    let url = format!("{}/health", server);
    let body = match send_json(client(10)?.get(&url)) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("brain-cli: cannot reach {} — {}", url, e);
            std::process::exit(1);
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Backend:     {}", body["backend"].as_str().unwrap_or("unknown"));
    println!("Version:     {}", body["version"].as_str().unwrap_or("?"));
    println!("Database:    {}", body["database"].as_str().unwrap_or("?"));
    println!("Connection:  {}", body["connection_status"].as_str().unwrap_or("?"));
    if let Some(names) = body["collections"].as_array() {
        let names: Vec<&str> = names.iter().filter_map(|n| n.as_str()).collect();
        println!("Collections: {}", names.join(", "));
    }
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    let cli = Cli::parse();
    let server = cli.server.trim_end_matches('/').to_string();

    let result = match cli.command {
        Commands::Capture {
            content,
            title,
            modality,
            tags,
            source_url,
        } => {
            let req = CaptureRequest {
                title,
                content: Some(content),
                modality,
                source_url,
                tags,
            };
            do_capture(&server, req, cli.json)
        }
        Commands::List { folder, limit } => do_list(&server, folder.as_deref(), limit, cli.json),
        Commands::Folders => do_folders(&server, cli.json),
        Commands::Status => do_status(&server, cli.json),
    };

    if let Err(e) = result {
        eprintln!("brain-cli: {}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Tests
// ============================================================================
