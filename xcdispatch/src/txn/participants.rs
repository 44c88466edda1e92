// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Remote participants and the global transaction manager

use super::state::TransactionStatus;
use crate::exec::error::UtilityResult;
use crate::routing::{NodeId, TransportError};
use serde::{Deserialize, Serialize};

/// Remote nodes taking part in the current transaction
pub trait ClusterParticipants: Send + Sync {
    /// Start the transaction on remote nodes as they get involved.
    /// `begin_query` replaces the plain BEGIN when options must be forwarded.
    fn begin(&self, begin_query: Option<&str>) -> Result<(), TransportError>;

    /// Nodes written by the current transaction
    fn participants(&self) -> Vec<NodeId>;

    fn prepare(&self, node: &NodeId, gid: &str) -> Result<(), TransportError>;

    fn finish_prepared(&self, node: &NodeId, gid: &str, commit: bool)
        -> Result<(), TransportError>;

    /// Abort the current transaction on participants that did not prepare
    fn abort(&self) -> Result<(), TransportError>;
}

/// Outcome of a prepared transaction, fixed once any branch is finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PreparedOutcome {
    #[default]
    Undecided,
    Commit,
    Rollback,
}

impl PreparedOutcome {
    pub fn from_commit(commit: bool) -> Self {
        if commit {
            PreparedOutcome::Commit
        } else {
            PreparedOutcome::Rollback
        }
    }

    /// A COMMIT (`commit`) or ROLLBACK PREPARED may still finish the transaction
    pub fn allows(&self, commit: bool) -> bool {
        match self {
            PreparedOutcome::Undecided => true,
            PreparedOutcome::Commit => commit,
            PreparedOutcome::Rollback => !commit,
        }
    }
}

impl std::fmt::Display for PreparedOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PreparedOutcome::Undecided => "undecided",
            PreparedOutcome::Commit => "commit",
            PreparedOutcome::Rollback => "rollback",
        };
        write!(f, "{}", name)
    }
}

/// A global transaction known to the GTM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedTransaction {
    pub gid: String,
    /// Remote nodes still holding a prepared branch
    pub participants: Vec<NodeId>,
    /// The coordinator wrote its own two-phase record
    pub coordinator_record: bool,
    #[serde(default)]
    pub outcome: PreparedOutcome,
}

impl PreparedTransaction {
    pub fn new(gid: &str, participants: Vec<NodeId>, coordinator_record: bool) -> Self {
        Self {
            gid: gid.to_string(),
            participants,
            coordinator_record,
            outcome: PreparedOutcome::Undecided,
        }
    }

    /// Branches left over from an aborted PREPARE: they may only be rolled back
    pub fn rollback_only(gid: &str, participants: Vec<NodeId>) -> Self {
        Self {
            outcome: PreparedOutcome::Rollback,
            ..Self::new(gid, participants, false)
        }
    }
}

/// Cluster-wide registry of global transaction ids
pub trait GlobalTransactionManager: Send + Sync {
    /// Register a prepared transaction; a gid still prepared is rejected
    /// with `GlobalTransactionInUse`
    fn record_prepared(&self, transaction: PreparedTransaction) -> UtilityResult<()>;

    /// Transaction still waiting for its second phase
    fn lookup_prepared(&self, gid: &str) -> Option<PreparedTransaction>;

    /// `node` finished its branch; the outcome is fixed from here on
    fn finish_participant(&self, gid: &str, node: &NodeId, commit: bool);

    fn complete(&self, gid: &str, status: TransactionStatus);

    fn status(&self, gid: &str) -> Option<TransactionStatus>;
}
