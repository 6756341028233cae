//! # Roster Architecture
//!
//! Roster keeps student records in plain text files, one line per record, with
//! a storage directory per student for its photo. It is a library that happens
//! to ship a CLI client; nothing from the API inward touches a terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (src/roster/cli/, wired by main.rs)                    │
//! │  - Parses arguments, prints tables, picks exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Thin facade over commands, owns store + config           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - Validation, uniqueness, side-effect ordering             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/) + line codec (codec.rs)                   │
//! │  - DataStore trait over a StorageBackend                    │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns
//! `Result<CmdResult>`. It never prints, never exits and emits diagnostics only
//! through `tracing`. The subscriber is installed by the client ([`logging`]).
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: thorough unit tests over `InMemoryStore`.
//! 2. **API**: dispatch tests.
//! 3. **Storage**: `tests/` runs the file store against temp directories.
//! 4. **CLI**: `tests/` drives the binary with `assert_cmd`.
//!
//! ## Module Overview
//!
//! - [`api`]: facade
//! - [`commands`]: one module per operation
//! - [`codec`]: record ⇄ line encoding
//! - [`store`]: tables and asset directories
//! - [`model`]: `Student`, `College`, `Department`
//! - [`config`]: `config.json`
//! - [`init`]: data root resolution and startup
//! - [`error`]: `RosterError` and `ErrorKind`
//! - [`logging`]: `tracing` subscriber setup

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod logging;
pub mod model;
pub mod store;
