//! # Roster CLI
//!
//! The binary is thin: it calls [`cli::run`] and turns an error into a message
//! on stderr and exit status 1. Everything from `roster::api` inward is UI
//! agnostic and never touches the terminal.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  CLI (src/roster/cli/)                       │
//! │  - clap parsing (setup.rs)                   │
//! │  - handlers + context wiring (commands.rs)   │
//! │  - colored tables and messages (render.rs)   │
//! └──────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌──────────────────────────────────────────────┐
//! │  API facade (roster::api)                    │
//! └──────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌──────────────────────────────────────────────┐
//! │  Commands + store (roster::commands, store)  │
//! └──────────────────────────────────────────────┘
//! ```

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
