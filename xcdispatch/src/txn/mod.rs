// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transaction control, two-phase commit and the cluster barrier

pub mod barrier;
pub mod coordinator;
pub mod isolation;
pub mod manager;
pub mod participants;
pub mod state;

pub use barrier::{generate_barrier_id, BarrierCoordinator, BarrierTransport};
pub use coordinator::TransactionCoordinator;
pub use isolation::{rewrite_begin_query, IsolationLevel};
pub use manager::LocalTransactionManager;
pub use participants::{
    ClusterParticipants, GlobalTransactionManager, PreparedOutcome, PreparedTransaction,
};
pub use state::{TransactionState, TransactionStatus};
