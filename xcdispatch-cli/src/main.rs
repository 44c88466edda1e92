// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! xcdispatch CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments first to get log level
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // Default to Warn (can still be overridden by RUST_LOG env var)
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    match cli.command {
        Commands::Version => {
            println!("{} {}", "xcdispatch".bold().green(), xcdispatch::VERSION);
            println!("Utility statement dispatch for coordinator/datanode clusters");
            Ok(())
        }

        Commands::Classify {
            script,
            config,
            format,
        } => cli::handle_classify(script, config, format),

        Commands::Simulate {
            script,
            config,
            role,
            from_coordinator,
            read_only,
            recovery,
            security_restricted,
            no_superuser,
            format,
        } => {
            let options = cli::SimulateOptions {
                role: role.into(),
                from_coordinator,
                read_only,
                recovery,
                security_restricted,
                superuser: !no_superuser,
            };
            cli::handle_simulate(script, config, options, format)
        }
    }
}
