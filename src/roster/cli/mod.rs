//! # CLI Layer
//!
//! One possible client for roster. This is the only place that parses
//! arguments, prints, picks colors or decides exit codes.
//!
//! Running `roster` with no subcommand lists students.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: per-command handlers that call the API and print results
//! - `render`: tables and messages as strings

mod commands;
mod render;
pub mod setup;

pub use commands::run;
