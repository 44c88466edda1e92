// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for xcdispatch
//!
//! Classifies statement scripts and replays them against the in-memory
//! cluster, printing completion tags and the collaborator calls each
//! statement caused.

pub mod commands;
pub mod handlers;
pub mod output;
pub mod script;

pub use commands::{Cli, Commands};
pub use handlers::{handle_classify, handle_simulate, SimulateOptions};
