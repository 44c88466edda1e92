// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use xcdispatch::NodeRole;

#[derive(Parser)]
#[command(name = "xcdispatch")]
#[command(version, about = "Utility statement dispatch for coordinator/datanode clusters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<log::Level>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version information
    Version,

    /// Print tag, log level and target node group of every statement in a script
    Classify {
        /// Script file: JSON array of {"text", "statement"} entries
        script: PathBuf,

        /// Dispatcher configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Dispatch a script against an in-memory cluster
    Simulate {
        /// Script file: JSON array of {"text", "statement"} entries
        script: PathBuf,

        /// Dispatcher configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Role of the node receiving the statements
        #[arg(long, value_enum, default_value = "coordinator")]
        role: RoleArg,

        /// Treat statements as routed here by another coordinator
        #[arg(long)]
        from_coordinator: bool,

        /// Run inside a read-only transaction
        #[arg(long)]
        read_only: bool,

        /// Run while the node is in recovery
        #[arg(long)]
        recovery: bool,

        /// Run inside a security-restricted operation
        #[arg(long)]
        security_restricted: bool,

        /// Run as an ordinary user instead of a superuser
        #[arg(long)]
        no_superuser: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Coordinator,
    Datanode,
}

impl From<RoleArg> for NodeRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Coordinator => NodeRole::Coordinator,
            RoleArg::Datanode => NodeRole::Datanode,
        }
    }
}
