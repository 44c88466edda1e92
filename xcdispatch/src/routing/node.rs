// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Cluster nodes, node groups and topology

use serde::{Deserialize, Serialize};

/// Name of a cluster node as registered in the node catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(name: impl Into<String>) -> Self {
        NodeId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        NodeId(name.to_string())
    }
}

/// Role this backend plays in the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeRole {
    #[default]
    Coordinator,
    Datanode,
}

/// Set of nodes that must also run a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeGroup {
    All,
    Coordinators,
    Datanodes,
    None,
}

impl NodeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeGroup::All => "ALL",
            NodeGroup::Coordinators => "COORDINATORS",
            NodeGroup::Datanodes => "DATANODES",
            NodeGroup::None => "NONE",
        }
    }
}

impl std::fmt::Display for NodeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static cluster layout seen from the local node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterTopology {
    pub local_node: NodeId,
    pub coordinators: Vec<NodeId>,
    pub datanodes: Vec<NodeId>,
}

impl Default for ClusterTopology {
    fn default() -> Self {
        Self {
            local_node: NodeId::from("coord1"),
            coordinators: vec![NodeId::from("coord1"), NodeId::from("coord2")],
            datanodes: vec![NodeId::from("dn1"), NodeId::from("dn2")],
        }
    }
}

impl ClusterTopology {
    pub fn role(&self) -> NodeRole {
        if self.datanodes.contains(&self.local_node) {
            NodeRole::Datanode
        } else {
            NodeRole::Coordinator
        }
    }

    /// Coordinators other than the local node
    pub fn remote_coordinators(&self) -> Vec<NodeId> {
        self.coordinators
            .iter()
            .filter(|node| **node != self.local_node)
            .cloned()
            .collect()
    }

    /// Remote members of a node group, coordinators first
    pub fn members(&self, group: NodeGroup) -> Vec<NodeId> {
        match group {
            NodeGroup::All => {
                let mut nodes = self.remote_coordinators();
                nodes.extend(self.datanodes.iter().cloned());
                nodes
            }
            NodeGroup::Coordinators => self.remote_coordinators(),
            NodeGroup::Datanodes => self.datanodes.clone(),
            NodeGroup::None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_exclude_local_coordinator() {
        let topology = ClusterTopology::default();
        assert_eq!(topology.role(), NodeRole::Coordinator);
        assert_eq!(
            topology.members(NodeGroup::Coordinators),
            vec![NodeId::from("coord2")]
        );
        assert_eq!(
            topology.members(NodeGroup::All),
            vec![
                NodeId::from("coord2"),
                NodeId::from("dn1"),
                NodeId::from("dn2")
            ]
        );
        assert!(topology.members(NodeGroup::None).is_empty());
    }

    #[test]
    fn test_datanode_role() {
        let topology = ClusterTopology {
            local_node: NodeId::from("dn1"),
            ..ClusterTopology::default()
        };
        assert_eq!(topology.role(), NodeRole::Datanode);
    }
}
