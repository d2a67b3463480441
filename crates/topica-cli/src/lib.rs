//! Topica CLI library.
//!
//! Configuration loading, the batch runner that drives extraction over a
//! directory of documents, command execution and output formatting for the
//! `topica` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod runner;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use runner::{DocumentReport, DocumentStatus, RunReport, Runner};
