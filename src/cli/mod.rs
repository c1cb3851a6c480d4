//! CLI module for the board gateway
//!
//! Provides subcommands for running the service:
//! - `serve`: run the GraphQL API server (default)
//! - `migrate`: apply database migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Board gateway - GraphQL board/comment API with stateless auth
#[derive(Parser)]
#[command(name = "board-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the GraphQL API server
    Serve,

    /// Apply database migrations and exit
    Migrate,
}
