// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transaction state machine

use serde::{Deserialize, Serialize};

/// Transaction status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// No transaction block open
    #[default]
    Idle,
    InProgress,
    /// Phase one done, waiting for COMMIT / ROLLBACK PREPARED
    Prepared,
    Committed,
    Aborted,
}

impl TransactionStatus {
    /// Check whether moving to `next` is a legal transition
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, next),
            (Idle, InProgress)
                | (InProgress, Committed)
                | (InProgress, Aborted)
                | (InProgress, Prepared)
                | (Prepared, Committed)
                | (Prepared, Aborted)
                | (Committed, Idle)
                | (Aborted, Idle)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Committed | TransactionStatus::Aborted)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransactionStatus::Idle => "idle",
            TransactionStatus::InProgress => "in progress",
            TransactionStatus::Prepared => "prepared",
            TransactionStatus::Committed => "committed",
            TransactionStatus::Aborted => "aborted",
        };
        write!(f, "{}", name)
    }
}

/// Snapshot of the local backend transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionState {
    pub status: TransactionStatus,
    /// Global id once the transaction is prepared
    pub global_id: Option<String>,
}
