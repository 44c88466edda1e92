// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement logging verbosity classes

use super::SessionObjectLookup;
use crate::ast::{QueryCommand, QueryStatement, Statement};
use serde::{Deserialize, Serialize};

/// Logging class of a statement, ordered from least to most verbose.
///
/// `None` only appears as a configuration value; classified statements are
/// always `Ddl`, `Mod` or `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum LogStmtLevel {
    #[default]
    None,
    Ddl,
    Mod,
    All,
}

impl LogStmtLevel {
    /// Whether a statement of this level is logged under the `configured` setting
    pub fn is_logged_under(&self, configured: LogStmtLevel) -> bool {
        *self != LogStmtLevel::None && *self <= configured
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogStmtLevel::None => "none",
            LogStmtLevel::Ddl => "ddl",
            LogStmtLevel::Mod => "mod",
            LogStmtLevel::All => "all",
        }
    }
}

impl std::fmt::Display for LogStmtLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Logging class for a statement, looking through PREPARE / EXECUTE / EXPLAIN ANALYZE
pub fn log_level(statement: &Statement, lookup: &dyn SessionObjectLookup) -> LogStmtLevel {
    use LogStmtLevel::{All, Ddl, Mod};

    match statement {
        Statement::Query(query) => query_level(query),
        Statement::Prepare(prepare) => log_level(&prepare.query, lookup),
        Statement::Execute(execute) => match lookup.prepared_statement(&execute.name) {
            Some(prepared) => log_level(&prepared.statement, lookup),
            None => All,
        },
        Statement::Explain(explain) => {
            if explain.analyze {
                log_level(&explain.query, lookup)
            } else {
                All
            }
        }
        Statement::Copy(copy) => {
            if copy.is_from {
                Mod
            } else {
                All
            }
        }
        Statement::Truncate(_) => Mod,

        Statement::Transaction(_)
        | Statement::ClosePortal { .. }
        | Statement::Fetch(_)
        | Statement::Deallocate { .. }
        | Statement::Do { .. }
        | Statement::Notify { .. }
        | Statement::Listen { .. }
        | Statement::Unlisten { .. }
        | Statement::Load { .. }
        | Statement::Vacuum(_)
        | Statement::VariableSet(_)
        | Statement::VariableShow { .. }
        | Statement::Discard { .. }
        | Statement::Lock(_)
        | Statement::ConstraintsSet { .. }
        | Statement::Checkpoint
        | Statement::Reindex(_)
        | Statement::Barrier { .. } => All,

        Statement::CreateSchema(_)
        | Statement::CreateTable(_)
        | Statement::CreateForeignTable(_)
        | Statement::AlterTable(_)
        | Statement::Drop(_)
        | Statement::Comment(_)
        | Statement::SecurityLabel { .. }
        | Statement::Rename(_)
        | Statement::AlterObjectSchema(_)
        | Statement::AlterOwner(_)
        | Statement::CreateTablespace { .. }
        | Statement::DropTablespace { .. }
        | Statement::AlterTablespaceOptions { .. }
        | Statement::CreateExtension { .. }
        | Statement::AlterExtension { .. }
        | Statement::AlterExtensionContents { .. }
        | Statement::CreateForeignDataWrapper { .. }
        | Statement::AlterForeignDataWrapper { .. }
        | Statement::DropForeignDataWrapper { .. }
        | Statement::CreateForeignServer { .. }
        | Statement::AlterForeignServer { .. }
        | Statement::DropForeignServer { .. }
        | Statement::CreateUserMapping { .. }
        | Statement::AlterUserMapping { .. }
        | Statement::DropUserMapping { .. }
        | Statement::AlterDomain { .. }
        | Statement::CreateDomain { .. }
        | Statement::AlterFunction { .. }
        | Statement::Define(_)
        | Statement::CompositeType { .. }
        | Statement::CreateEnum { .. }
        | Statement::AlterEnum { .. }
        | Statement::CreateView(_)
        | Statement::CreateFunction { .. }
        | Statement::RemoveFunction(_)
        | Statement::CreateIndex(_)
        | Statement::CreateRule(_)
        | Statement::CreateSequence { .. }
        | Statement::AlterSequence { .. }
        | Statement::Grant(_)
        | Statement::GrantRole(_)
        | Statement::AlterDefaultPrivileges { .. }
        | Statement::CreateDatabase { .. }
        | Statement::AlterDatabase { .. }
        | Statement::AlterDatabaseSet { .. }
        | Statement::DropDatabase { .. }
        | Statement::Cluster { .. }
        | Statement::CreateTrigger { .. }
        | Statement::DropProperty(_)
        | Statement::CreateLanguage { .. }
        | Statement::DropLanguage { .. }
        | Statement::CreateRole { .. }
        | Statement::AlterRole { .. }
        | Statement::AlterRoleSet { .. }
        | Statement::DropRole { .. }
        | Statement::DropOwned { .. }
        | Statement::ReassignOwned { .. }
        | Statement::CreateConversion { .. }
        | Statement::CreateCast { .. }
        | Statement::DropCast { .. }
        | Statement::CreateOperatorClass { .. }
        | Statement::CreateOperatorFamily { .. }
        | Statement::AlterOperatorFamily { .. }
        | Statement::DropOperatorClass { .. }
        | Statement::DropOperatorFamily { .. }
        | Statement::AlterTsDictionary { .. }
        | Statement::AlterTsConfiguration { .. }
        | Statement::CleanConnection(_) => Ddl,
    }
}

fn query_level(query: &QueryStatement) -> LogStmtLevel {
    match query.command {
        // CREATE TABLE AS / SELECT INTO
        QueryCommand::Select if query.into.is_some() => LogStmtLevel::Ddl,
        QueryCommand::Select => LogStmtLevel::All,
        QueryCommand::Insert | QueryCommand::Update | QueryCommand::Delete => LogStmtLevel::Mod,
    }
}
