// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Test utilities for xcdispatch integration tests
//!
//! - TestFixture: dispatcher wired to a fresh in-memory cluster
//! - statements: one sample statement for every statement kind

#![allow(dead_code)]

pub mod statements;
pub mod test_fixture;
