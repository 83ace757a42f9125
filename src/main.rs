//! # Memory Book CLI (`membook`)
//!
//! The `membook` binary serves the web UI and offers the same catalog,
//! search, and view operations on the command line.
//!
//! ## Usage
//!
//! ```bash
//! membook [--config memorybook.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `membook serve` | Start the HTTP server |
//! | `membook list` | List all memory files, newest first |
//! | `membook search "<query>"` | Two-tier AND search across all files |
//! | `membook view <name>` | Print one file's sections |
//!
//! ## Configuration
//!
//! The workspace root, host, and port come from `MEMORYBOOK_WORKSPACE`,
//! `MEMORYBOOK_HOST`, and `MEMORYBOOK_PORT`, with an optional TOML file
//! underneath (env vars win). The memory directory is always
//! `workspace/memory`; core files default to `MEMORY.md`.

mod catalog;
mod config;
mod guard;
mod markdown;
mod models;
mod search;
mod sections;
mod server;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Memory Book — browse, search, and edit an agent's memory markdown files.
#[derive(Parser)]
#[command(
    name = "membook",
    about = "Memory Book — a local web UI for agent memory markdown files",
    version
)]
struct Cli {
    /// Path to an optional configuration file (TOML). Environment
    /// variables override values from the file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    ///
    /// Binds to the configured host/port and serves the browse, save,
    /// and search endpoints until terminated.
    Serve,

    /// List all memory files, newest first.
    List,

    /// Search indexed memory files.
    ///
    /// All query words must appear for a match; single-line hits are
    /// listed before whole-section hits.
    Search {
        /// The search query string.
        query: String,

        /// Maximum number of results to print.
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },

    /// Print one file's sections by file name (e.g. `2026-02-24.md`).
    View {
        /// File name as shown by `membook list`.
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let cfg = config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            let files = catalog::list_files(&cfg)?;
            println!("Memory Book");
            println!("Workspace:   {}", cfg.workspace.display());
            println!("Memory dir:  {}", cfg.memory_dir().display());
            println!("Files found: {}", files.len());
            println!();
            server::run_server(&cfg).await?;
        }
        Commands::List => {
            let files = catalog::list_files(&cfg)?;
            if files.is_empty() {
                println!("No memory files.");
                return Ok(());
            }
            for f in &files {
                let group = f.month_label.as_deref().unwrap_or("Core");
                println!(
                    "{:<24} {:>8} bytes  {:>5} lines  [{}]",
                    f.name, f.size_bytes, f.line_count, group
                );
            }
        }
        Commands::Search { query, limit } => {
            let trimmed = query.trim();
            if trimmed.chars().count() < 2 {
                println!("No results.");
                return Ok(());
            }
            let mut results = search::search(&cfg, trimmed)?;
            results.truncate(limit);
            if results.is_empty() {
                println!("No results.");
                return Ok(());
            }
            for (i, r) in results.iter().enumerate() {
                println!("{}. {}:{}", i + 1, r.file_name, r.line);
                if let Some(ref title) = r.section_title {
                    println!("    section: {}", title);
                }
                println!("    \"{}\"", r.matched_text);
            }
        }
        Commands::View { name } => {
            let files = catalog::list_files(&cfg)?;
            let entry = match files.iter().find(|f| f.name == name) {
                Some(e) => e,
                None => {
                    eprintln!("Error: no memory file named '{}'", name);
                    std::process::exit(1);
                }
            };
            let content = catalog::read_lossy(entry.path.as_ref())?;
            println!("--- {} ---", entry.display);
            for s in sections::parse(&content) {
                println!("[{}] (lines {}-{})", s.title, s.start_line, s.end_line);
                println!("{}", s.body.trim_end());
                println!();
            }
        }
    }

    Ok(())
}
