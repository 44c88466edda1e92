// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog lookups needed for node targeting

use crate::ast::QualifiedName;
use crate::exec::error::UtilityResult;
use serde::{Deserialize, Serialize};

/// Actual kind of a named relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    Table,
    View,
    Sequence,
    ForeignTable,
    Index,
}

impl RelationKind {
    /// Views and sequences live on coordinators only
    pub fn is_coordinator_only(&self) -> bool {
        matches!(self, RelationKind::View | RelationKind::Sequence)
    }
}

/// Catalog lookup collaborator
pub trait CatalogLookup: Send + Sync {
    /// Resolve a relation name; unknown names raise `RelationNotFound`
    fn resolve_relation_kind(&self, name: &QualifiedName) -> UtilityResult<RelationKind>;
}
