// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! xcdispatch - utility statement dispatch for a coordinator/datanode SQL cluster
//!
//! Every non-query statement passes through this layer after parsing. It
//! classifies the statement, checks that it may run in the current
//! transaction, recovery and security context, executes it through the local
//! command handlers and decides which other nodes must apply it too.
//!
//! # Features
//!
//! - **Classification**: command tag and logging class for every statement kind
//! - **Execution gate**: read-only, recovery, security-restriction and
//!   transaction-block rules
//! - **Node targeting**: ALL / COORDINATORS / DATANODES / NONE per statement,
//!   resolving the actual relation kind through the catalog
//! - **Two-phase commit**: PREPARE TRANSACTION and COMMIT/ROLLBACK PREPARED
//!   across participants, plus the cluster BARRIER
//!
//! # Usage
//!
//! ```bash
//! # Tags, log levels and node groups of a script
//! xcdispatch classify script.json
//!
//! # Dispatch a script against the in-memory cluster
//! xcdispatch simulate script.json --read-only
//! ```

pub mod ast;
pub mod classify;
pub mod cluster;
pub mod config;
pub mod exec;
pub mod routing;
pub mod txn;

pub use ast::{Statement, StatementKind};
pub use classify::{classify, Classification, LogStmtLevel};
pub use cluster::MemoryCluster;
pub use config::{DispatcherConfig, UnsupportedFeature};
pub use exec::{
    Collaborators, CompletionTag, ExecutionContext, UtilityCall, UtilityDispatcher, UtilityError,
    UtilityResult,
};
pub use routing::{ClusterTopology, NodeGroup, NodeId, NodeRole};

/// xcdispatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// xcdispatch crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
