//! # Memory Book
//!
//! A local-first web service for browsing, searching, and editing the
//! markdown "memory" files an autonomous agent writes into its workspace.
//!
//! Memory Book reads daily notes from `workspace/memory/*.md` plus a fixed
//! set of core files (e.g. `MEMORY.md`), renders them as HTML, splits them
//! into `## `-header sections, and answers multi-word AND searches across
//! the whole collection — line-level hits first, whole-section hits after.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────────┐   ┌───────────┐
//! │  Catalog  │──▶│  Sections /  │──▶│  Search   │
//! │ workspace │   │   Markdown   │   │ two-tier  │
//! └───────────┘   └──────────────┘   └────┬──────┘
//!                                         │
//!                     ┌───────────────────┤
//!                     ▼                   ▼
//!                ┌──────────┐       ┌──────────┐
//!                │   CLI    │       │   HTTP   │
//!                │(membook) │       │  (axum)  │
//!                └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export MEMORYBOOK_WORKSPACE=~/.openclaw/workspace
//! membook list                  # show the catalog
//! membook search "walked dog"   # search across all files
//! membook serve                 # start the HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Workspace and server configuration |
//! | [`models`] | Core data types |
//! | [`markdown`] | Minimal markdown-to-HTML renderer |
//! | [`sections`] | Header-delimited section parser |
//! | [`catalog`] | Workspace file enumeration |
//! | [`search`] | Two-tier AND search engine |
//! | [`guard`] | Write-path validation |
//! | [`server`] | HTTP server |

pub mod catalog;
pub mod config;
pub mod guard;
pub mod markdown;
pub mod models;
pub mod search;
pub mod sections;
pub mod server;
