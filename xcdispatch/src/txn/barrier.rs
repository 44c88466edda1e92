// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Cluster-wide barrier for consistent-cut checkpointing
//!
//! Runs outside the generic propagation path: every node must acknowledge
//! each phase, a plain fan-out is not enough.

use crate::exec::context::ExecutionContext;
use crate::exec::error::{UtilityError, UtilityResult};
use crate::routing::{ClusterTopology, NodeGroup, NodeId, TransportError};
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;

/// Barrier messages to individual nodes
pub trait BarrierTransport: Send + Sync {
    /// Phase 1 on a remote coordinator: stop admitting new commits
    fn prepare_barrier(&self, node: &NodeId, id: &str) -> Result<(), TransportError>;

    /// Phase 2 on any remote node: write the barrier record
    fn execute_barrier(&self, node: &NodeId, id: &str) -> Result<(), TransportError>;

    /// Phase 3 on a remote coordinator: resume commits
    fn end_barrier(&self, node: &NodeId, id: &str) -> Result<(), TransportError>;

    /// Write the barrier record on this node
    fn record_local(&self, id: &str) -> UtilityResult<()>;
}

pub struct BarrierCoordinator {
    transport: Arc<dyn BarrierTransport>,
    topology: ClusterTopology,
    lock: Arc<RwLock<()>>,
}

impl BarrierCoordinator {
    pub fn new(
        transport: Arc<dyn BarrierTransport>,
        topology: ClusterTopology,
        lock: Arc<RwLock<()>>,
    ) -> Self {
        Self {
            transport,
            topology,
            lock,
        }
    }

    /// Run the barrier and return its id
    pub fn request_barrier(
        &self,
        id: Option<&str>,
        context: &ExecutionContext,
    ) -> UtilityResult<String> {
        if !context.is_client_facing_coordinator() {
            return Err(UtilityError::BarrierOrigin);
        }

        let id = match id {
            Some(id) => id.to_string(),
            None => generate_barrier_id(&self.topology.local_node),
        };

        // No prepared-transaction finish may straddle the cut
        let _guard = self.lock.write();
        log::info!("Starting barrier '{}'", id);

        let coordinators = self.topology.remote_coordinators();
        let mut prepared = Vec::new();
        for node in &coordinators {
            match self.transport.prepare_barrier(node, &id) {
                Ok(()) => prepared.push(node.clone()),
                Err(e) => {
                    self.end_on(&prepared, &id);
                    return Err(barrier_failed(&id, e));
                }
            }
        }

        for node in self.topology.members(NodeGroup::All) {
            if let Err(e) = self.transport.execute_barrier(&node, &id) {
                self.end_on(&prepared, &id);
                return Err(barrier_failed(&id, e));
            }
        }
        if let Err(e) = self.transport.record_local(&id) {
            self.end_on(&prepared, &id);
            return Err(e);
        }

        for node in &coordinators {
            self.transport
                .end_barrier(node, &id)
                .map_err(|e| barrier_failed(&id, e))?;
        }

        log::info!("Barrier '{}' completed", id);
        Ok(id)
    }

    fn end_on(&self, nodes: &[NodeId], id: &str) {
        for node in nodes {
            if let Err(e) = self.transport.end_barrier(node, id) {
                log::warn!("Could not end barrier '{}' on {}: {}", id, node, e);
            }
        }
    }
}

/// Default barrier id: local node name and UTC timestamp in microseconds
pub fn generate_barrier_id(node: &NodeId) -> String {
    format!("{}_{}", node, Utc::now().timestamp_micros())
}

fn barrier_failed(id: &str, error: TransportError) -> UtilityError {
    UtilityError::BarrierFailed {
        id: id.to_string(),
        node: error.node().clone(),
        reason: error.to_string(),
    }
}
