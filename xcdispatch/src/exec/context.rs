// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Per-dispatch execution context
//!
//! Node role and connection origin are carried here instead of being read from
//! process-wide state, so nested dispatch sees exactly what its parent saw.

use crate::routing::NodeRole;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Issued directly by a client rather than produced by expansion
    pub is_top_level: bool,
    pub transaction_read_only: bool,
    /// Node is replaying write-ahead log
    pub in_recovery: bool,
    /// Running inside a security-restricted operation
    pub in_security_restricted_operation: bool,
    /// Statement was already routed here by another coordinator
    pub received_from_coordinator: bool,
    pub role: NodeRole,
    /// Current user is a superuser
    pub superuser: bool,
    /// Nesting depth of expanded sub-statements
    pub depth: usize,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::top_level(NodeRole::Coordinator)
    }
}

impl ExecutionContext {
    /// Context for a statement a client sent to this node
    pub fn top_level(role: NodeRole) -> Self {
        Self {
            is_top_level: true,
            transaction_read_only: false,
            in_recovery: false,
            in_security_restricted_operation: false,
            received_from_coordinator: false,
            role,
            superuser: false,
            depth: 0,
        }
    }

    /// Context for a statement routed here by a coordinator
    pub fn from_coordinator(role: NodeRole) -> Self {
        Self {
            received_from_coordinator: true,
            ..Self::top_level(role)
        }
    }

    /// Context for a sub-statement produced by expanding this one
    pub fn for_substatement(&self) -> Self {
        Self {
            is_top_level: false,
            depth: self.depth + 1,
            ..self.clone()
        }
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.transaction_read_only = read_only;
        self
    }

    pub fn with_recovery(mut self, in_recovery: bool) -> Self {
        self.in_recovery = in_recovery;
        self
    }

    pub fn with_security_restriction(mut self, restricted: bool) -> Self {
        self.in_security_restricted_operation = restricted;
        self
    }

    pub fn with_superuser(mut self, superuser: bool) -> Self {
        self.superuser = superuser;
        self
    }

    /// Coordinator that received the statement from a client
    pub fn is_client_facing_coordinator(&self) -> bool {
        self.role == NodeRole::Coordinator && !self.received_from_coordinator
    }

    /// Whether this dispatch may fan the statement out to other nodes
    pub fn propagates(&self) -> bool {
        self.is_client_facing_coordinator() && self.is_top_level
    }
}
