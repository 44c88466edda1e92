// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory reference cluster
//!
//! Used by the integration tests and by `xcdispatch simulate`.

pub mod journal;
pub mod memory;

pub use journal::{ClusterEvent, Journal, JournalEntry};
pub use memory::MemoryCluster;
