// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Utility dispatch error types

use crate::routing::{NodeId, TransportError};
use crate::txn::PreparedOutcome;
use thiserror::Error;

/// Errors raised while gating, executing or routing a utility statement
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilityError {
    #[error("cannot execute {command} in a read-only transaction")]
    ReadOnlyViolation { command: String },

    #[error("cannot execute {command} during recovery")]
    RecoveryViolation { command: String },

    #[error("cannot execute {command} within security-restricted operation")]
    SecurityRestrictionViolation { command: String },

    #[error("{command} can only be used in transaction blocks")]
    TransactionBlockRequired { command: String },

    #[error("{command} cannot run inside a transaction block")]
    TransactionBlockForbidden { command: String },

    #[error("cluster does not support {feature} yet")]
    UnsupportedInCluster { feature: String },

    #[error("cluster does not support {command} on multiple object types; issue views/sequences and tables in separate statements")]
    AmbiguousMultiObjectTarget { command: String },

    #[error("could not prepare transaction \"{gid}\" on node {node}: {reason}")]
    ParticipantPrepareFailed {
        gid: String,
        node: NodeId,
        reason: String,
    },

    #[error("could not finish prepared transaction \"{gid}\" on node {node}: {reason}")]
    ParticipantFinishFailed {
        gid: String,
        node: NodeId,
        reason: String,
    },

    #[error("prepared transaction with identifier \"{gid}\" does not exist")]
    UnknownGlobalTransaction { gid: String },

    #[error("transaction identifier \"{gid}\" is already in use")]
    GlobalTransactionInUse { gid: String },

    #[error("prepared transaction \"{gid}\" can only be finished with {outcome}")]
    PreparedOutcomeConflict {
        gid: String,
        outcome: PreparedOutcome,
    },

    #[error("must be superuser to do {command}")]
    InsufficientPrivilege { command: String },

    #[error("relation \"{name}\" does not exist")]
    RelationNotFound { name: String },

    #[error("remote execution failed: {0}")]
    Propagation(#[from] TransportError),

    #[error("connection pool rejected {command} (status {status})")]
    PoolerCommandFailed { command: String, status: i32 },

    #[error("barrier \"{id}\" failed on node {node}: {reason}")]
    BarrierFailed {
        id: String,
        node: NodeId,
        reason: String,
    },

    #[error("BARRIER can only be issued by a client connected to a coordinator")]
    BarrierOrigin,

    #[error("statement expansion exceeded maximum depth {depth}")]
    RecursionLimitExceeded { depth: usize },

    #[error("Command error: {0}")]
    Handler(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("unrecognized statement kind: {0}")]
    UnknownStatementKind(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UtilityError {
    /// PostgreSQL-compatible SQLSTATE for the error
    pub fn sqlstate(&self) -> &'static str {
        match self {
            UtilityError::ReadOnlyViolation { .. } | UtilityError::RecoveryViolation { .. } => {
                "25006"
            }
            UtilityError::SecurityRestrictionViolation { .. }
            | UtilityError::InsufficientPrivilege { .. } => "42501",
            UtilityError::TransactionBlockRequired { .. } => "25P01",
            UtilityError::TransactionBlockForbidden { .. } => "25001",
            UtilityError::UnsupportedInCluster { .. } | UtilityError::BarrierOrigin => "0A000",
            UtilityError::AmbiguousMultiObjectTarget { .. }
            | UtilityError::RecursionLimitExceeded { .. } => "54001",
            UtilityError::ParticipantPrepareFailed { .. } => "40000",
            UtilityError::ParticipantFinishFailed { .. }
            | UtilityError::Propagation(_)
            | UtilityError::BarrierFailed { .. } => "08006",
            UtilityError::UnknownGlobalTransaction { .. } => "42704",
            UtilityError::GlobalTransactionInUse { .. } => "42710",
            UtilityError::PreparedOutcomeConflict { .. } => "55000",
            UtilityError::RelationNotFound { .. } => "42P01",
            UtilityError::Config(_) => "F0000",
            UtilityError::PoolerCommandFailed { .. }
            | UtilityError::Handler(_)
            | UtilityError::UnknownStatementKind(_)
            | UtilityError::Internal(_) => "XX000",
        }
    }

    /// Invariant violations inside this layer, never caused by user input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            UtilityError::UnknownStatementKind(_) | UtilityError::Internal(_)
        )
    }
}

pub type UtilityResult<T> = Result<T, UtilityError>;
