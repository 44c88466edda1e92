// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Remote execution and connection pool channels
//!
//! Both channels are owned by the networking layer. This crate only hands them
//! requests and surfaces their failures; it never retries.

use super::node::{NodeGroup, NodeId};
use crate::ast::CleanConnectionStatement;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures reported by the remote transport
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("node {node} unreachable: {reason}")]
    Unreachable { node: NodeId, reason: String },

    #[error("node {node} reported: {message}")]
    Remote { node: NodeId, message: String },

    #[error("timed out waiting for node {node}")]
    Timeout { node: NodeId },
}

impl TransportError {
    pub fn node(&self) -> &NodeId {
        match self {
            TransportError::Unreachable { node, .. }
            | TransportError::Remote { node, .. }
            | TransportError::Timeout { node } => node,
        }
    }
}

/// How per-node results are combined into one outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombineSemantics {
    /// Every node must report the same outcome
    Same,
}

/// One fan-out of a statement's original text to a node group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteExecutionRequest {
    pub statement_text: String,
    pub node_group: NodeGroup,
    pub combine: CombineSemantics,
    /// Run outside the caller's transaction on the remote side
    pub force_autocommit: bool,
}

impl RemoteExecutionRequest {
    pub fn new(statement_text: impl Into<String>, node_group: NodeGroup) -> Self {
        Self {
            statement_text: statement_text.into(),
            node_group,
            combine: CombineSemantics::Same,
            force_autocommit: false,
        }
    }

    pub fn with_autocommit(mut self, force_autocommit: bool) -> Self {
        self.force_autocommit = force_autocommit;
        self
    }
}

/// Remote statement execution on a node group
pub trait RemoteTransport: Send + Sync {
    fn execute_on_nodes(&self, request: &RemoteExecutionRequest) -> Result<(), TransportError>;
}

/// Session-state channel into the connection pool manager
pub trait PoolerChannel: Send + Sync {
    /// Record a SET/DISCARD so new pooled connections inherit it.
    /// A negative status means the pool rejected the command.
    fn set_session_option(&self, is_local: bool, text: &str) -> i32;

    /// Drop pooled connections matching the request
    fn clean_connections(&self, request: &CleanConnectionStatement) -> Result<(), TransportError>;
}
