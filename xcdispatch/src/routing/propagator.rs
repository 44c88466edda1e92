// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Remote propagation
//!
//! Statements travel as their original text. The tree is never re-serialized.

use super::node::{ClusterTopology, NodeGroup};
use super::resolver::PropagationPlan;
use super::transport::{PoolerChannel, RemoteExecutionRequest, RemoteTransport};
use crate::ast::CleanConnectionStatement;
use crate::exec::error::{UtilityError, UtilityResult};
use std::sync::Arc;

pub struct RemotePropagator {
    transport: Arc<dyn RemoteTransport>,
    pooler: Arc<dyn PoolerChannel>,
    topology: ClusterTopology,
}

impl RemotePropagator {
    pub fn new(
        transport: Arc<dyn RemoteTransport>,
        pooler: Arc<dyn PoolerChannel>,
        topology: ClusterTopology,
    ) -> Self {
        Self {
            transport,
            pooler,
            topology,
        }
    }

    /// Fan the statement text out to the planned group
    pub fn propagate(&self, statement_text: &str, plan: &PropagationPlan) -> UtilityResult<()> {
        if plan.group == NodeGroup::None {
            return Ok(());
        }
        if self.topology.members(plan.group).is_empty() {
            log::debug!("No remote members in group {}, nothing to send", plan.group);
            return Ok(());
        }

        let request = RemoteExecutionRequest::new(statement_text, plan.group)
            .with_autocommit(plan.force_autocommit);
        log::debug!(
            "Sending to {} (autocommit: {}): {}",
            request.node_group,
            request.force_autocommit,
            request.statement_text
        );
        self.transport.execute_on_nodes(&request)?;
        Ok(())
    }

    /// Record a SET/DISCARD with the connection pool so pooled connections
    /// inherit it
    pub fn forward_session_command(
        &self,
        is_local: bool,
        statement_text: &str,
        command: &str,
    ) -> UtilityResult<()> {
        let status = self.pooler.set_session_option(is_local, statement_text);
        if status < 0 {
            return Err(UtilityError::PoolerCommandFailed {
                command: command.to_string(),
                status,
            });
        }
        log::debug!("Pooler accepted {} (local: {})", command, is_local);
        Ok(())
    }

    /// Drop pooled connections on this node
    pub fn clean_connections(&self, request: &CleanConnectionStatement) -> UtilityResult<()> {
        self.pooler.clean_connections(request)?;
        Ok(())
    }

    pub fn topology(&self) -> &ClusterTopology {
        &self.topology
    }
}
