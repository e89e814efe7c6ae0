// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::FanInPolicy;

/// Command-line arguments for `slurmchain`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "slurmchain",
    version,
    about = "Queue a pipeline of batch scripts with after-ok dependencies between them.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a pipeline file (TOML).
    ///
    /// Without it the built-in reference pipeline is submitted.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Start submission at this job instead of the configured roots.
    ///
    /// May be repeated; roots are submitted in the order given.
    #[arg(long = "from", value_name = "NAME")]
    pub from: Vec<String>,

    /// How to treat jobs reachable through more than one parent.
    ///
    /// Overrides `[config].fan_in`.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub fan_in: Option<FanInPolicy>,

    /// Print the scheduler commands with made-up job ids instead of
    /// running them.
    #[arg(long)]
    pub dry_run: bool,

    /// Validate and print the job graph, submit nothing.
    #[arg(long, conflicts_with = "dry_run")]
    pub plan: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SLURMCHAIN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
