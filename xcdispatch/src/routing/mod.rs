// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Cluster routing: topology, node targeting and remote propagation

pub mod catalog;
pub mod node;
pub mod propagator;
pub mod resolver;
pub mod transport;

pub use catalog::{CatalogLookup, RelationKind};
pub use node::{ClusterTopology, NodeGroup, NodeId, NodeRole};
pub use propagator::RemotePropagator;
pub use resolver::{NodeTargetResolver, PropagationPlan, PropagationTiming};
pub use transport::{
    CombineSemantics, PoolerChannel, RemoteExecutionRequest, RemoteTransport, TransportError,
};
