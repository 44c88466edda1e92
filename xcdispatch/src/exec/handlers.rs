// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Local command handler interface
//!
//! The per-statement command implementations live outside this crate. The
//! dispatcher reaches them through [`CommandHandlers`] only.

use crate::ast::{
    AlterTableStatement, CreateForeignTableStatement, CreateTableStatement, QualifiedName,
    Statement,
};
use crate::exec::error::UtilityResult;
use crate::routing::RelationKind;
use serde_json::Value;

/// Destination for rows produced by a statement
pub trait ResultSink {
    fn send_row(&mut self, row: Vec<Value>);
}

/// Sink that discards rows
pub struct NoneSink;

impl ResultSink for NoneSink {
    fn send_row(&mut self, _row: Vec<Value>) {}
}

/// Sink that keeps rows in memory
#[derive(Debug, Default)]
pub struct VecSink {
    pub rows: Vec<Vec<Value>>,
}

impl ResultSink for VecSink {
    fn send_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }
}

/// Outcome of a handler call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandlerOutcome {
    /// Rows processed, for statements reported as "TAG count"
    pub rows_processed: Option<u64>,
}

impl HandlerOutcome {
    pub fn with_rows(rows: u64) -> Self {
        Self {
            rows_processed: Some(rows),
        }
    }
}

/// Identifier of a relation created by `define_relation`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationId(pub u32);

/// Command handlers of this node.
///
/// Handlers must raise on permission or ownership failures rather than
/// silently doing nothing.
pub trait CommandHandlers: Send + Sync {
    /// Run the handler for a statement
    fn execute(
        &self,
        statement: &Statement,
        query_text: &str,
        params: &[Value],
        dest: &mut dyn ResultSink,
    ) -> UtilityResult<HandlerOutcome>;

    /// Expand CREATE TABLE / CREATE FOREIGN TABLE / ALTER TABLE into the
    /// ordered statements that implement it
    fn expand(&self, statement: &Statement, query_text: &str) -> UtilityResult<Vec<Statement>>;

    /// Create the catalog entry of a relation
    fn define_relation(
        &self,
        statement: &CreateTableStatement,
        kind: RelationKind,
    ) -> UtilityResult<RelationId>;

    /// Create the out-of-line storage object of a new table
    fn create_secondary_storage(
        &self,
        relation: RelationId,
        statement: &CreateTableStatement,
    ) -> UtilityResult<()>;

    fn create_foreign_table(
        &self,
        relation: RelationId,
        statement: &CreateForeignTableStatement,
    ) -> UtilityResult<()>;

    /// Apply the catalog edits of an expanded ALTER TABLE
    fn alter_table(&self, statement: &AlterTableStatement) -> UtilityResult<()>;

    fn check_relation_ownership(&self, relation: &QualifiedName) -> UtilityResult<()>;

    /// Forced checkpoint, or a restartpoint when the node is in recovery
    fn request_checkpoint(&self, restartpoint: bool) -> UtilityResult<()>;
}
