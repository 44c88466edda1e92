// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Dispatcher configuration

use crate::classify::LogStmtLevel;
use crate::exec::error::{UtilityError, UtilityResult};
use crate::routing::ClusterTopology;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Features that cannot yet run consistently across the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnsupportedFeature {
    /// SAVEPOINT
    Savepoints,
    /// PREPARE / EXECUTE of named statements
    PreparedStatements,
    /// CREATE INDEX CONCURRENTLY
    ConcurrentIndex,
    /// CREATE / DROP TRIGGER
    Triggers,
    /// CREATE / DROP / ALTER TABLESPACE
    Tablespaces,
}

/// Configuration for the utility dispatcher
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Cluster layout as seen from this node
    pub topology: ClusterTopology,

    /// Statement families rejected before any local effect
    pub unsupported_features: BTreeSet<UnsupportedFeature>,

    /// Bound on nested dispatch for expanded sub-statements
    pub max_recursion_depth: usize,

    /// Which statements are written to the log
    pub log_statement: LogStmtLevel,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            topology: ClusterTopology::default(),
            unsupported_features: [
                UnsupportedFeature::Savepoints,
                UnsupportedFeature::PreparedStatements,
                UnsupportedFeature::ConcurrentIndex,
                UnsupportedFeature::Triggers,
                UnsupportedFeature::Tablespaces,
            ]
            .into_iter()
            .collect(),
            max_recursion_depth: 32,
            log_statement: LogStmtLevel::None,
        }
    }
}

impl DispatcherConfig {
    /// Configuration with every feature enabled, for single-node style testing
    pub fn permissive() -> Self {
        Self {
            unsupported_features: BTreeSet::new(),
            ..Self::default()
        }
    }

    pub fn with_topology(mut self, topology: ClusterTopology) -> Self {
        self.topology = topology;
        self
    }

    pub fn is_unsupported(&self, feature: UnsupportedFeature) -> bool {
        self.unsupported_features.contains(&feature)
    }

    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_file(path: impl AsRef<Path>) -> UtilityResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            UtilityError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: DispatcherConfig = serde_json::from_str(&text).map_err(|e| {
            UtilityError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        log::debug!(
            "Loaded dispatcher config from {} (local node {})",
            path.display(),
            config.topology.local_node
        );
        Ok(config)
    }

    pub fn validate(&self) -> UtilityResult<()> {
        if self.max_recursion_depth == 0 {
            return Err(UtilityError::Config(
                "max_recursion_depth must be at least 1".to_string(),
            ));
        }
        let local = &self.topology.local_node;
        if !self.topology.coordinators.contains(local) && !self.topology.datanodes.contains(local)
        {
            return Err(UtilityError::Config(format!(
                "local node {} is not part of the topology",
                local
            )));
        }
        Ok(())
    }
}
