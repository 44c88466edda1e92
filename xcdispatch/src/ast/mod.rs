// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement tree consumed by the utility dispatcher

#[allow(clippy::module_inception)]
mod ast;
pub use ast::*;
