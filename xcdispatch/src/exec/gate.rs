// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Execution gate
//!
//! Every statement kind maps to one static [`GateProfile`]. The checks run
//! before any handler is invoked, so a rejection never leaves partial effects.

use super::context::ExecutionContext;
use super::error::{UtilityError, UtilityResult};
use crate::ast::{ObjectType, Statement, TransactionStatement};

/// Transaction block rule for a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRule {
    Unrestricted,
    /// Must run inside an explicit transaction block
    Required(&'static str),
    /// Must not run inside a transaction block nor from nested dispatch
    Forbidden(&'static str),
    /// Must not run from nested dispatch
    TopLevelOnly(&'static str),
}

/// Static gate rules for one statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateProfile {
    /// Rejected while the transaction is read-only
    pub rejected_when_read_only: bool,
    /// Command name used when rejecting during recovery
    pub recovery_command: Option<&'static str>,
    /// Command name used when rejecting inside a security-restricted operation
    pub restricted_command: Option<&'static str>,
    pub block: BlockRule,
    pub requires_superuser: Option<&'static str>,
}

impl GateProfile {
    const fn unrestricted() -> Self {
        Self {
            rejected_when_read_only: false,
            recovery_command: None,
            restricted_command: None,
            block: BlockRule::Unrestricted,
            requires_superuser: None,
        }
    }

    const fn mutating() -> Self {
        Self {
            rejected_when_read_only: true,
            ..Self::unrestricted()
        }
    }

    const fn recovery(command: &'static str) -> Self {
        Self {
            recovery_command: Some(command),
            ..Self::unrestricted()
        }
    }

    const fn restricted(command: &'static str) -> Self {
        Self {
            restricted_command: Some(command),
            ..Self::unrestricted()
        }
    }

    const fn block(mut self, rule: BlockRule) -> Self {
        self.block = rule;
        self
    }
}

/// Gate rules for a statement
pub fn profile(statement: &Statement) -> GateProfile {
    match statement {
        Statement::Transaction(txn) => transaction_profile(txn),

        Statement::Query(_)
        | Statement::Fetch(_)
        | Statement::Copy(_)
        | Statement::Execute(_)
        | Statement::Do { .. }
        | Statement::Load { .. }
        | Statement::Explain(_)
        | Statement::VariableSet(_)
        | Statement::VariableShow { .. }
        | Statement::ConstraintsSet { .. }
        | Statement::Barrier { .. }
        | Statement::CleanConnection(_) => GateProfile::unrestricted(),

        Statement::ClosePortal { .. } => GateProfile::restricted("CLOSE"),
        Statement::Prepare(_) => GateProfile::restricted("PREPARE"),
        Statement::Deallocate { .. } => GateProfile::restricted("DEALLOCATE"),
        Statement::Discard { .. } => GateProfile::restricted("DISCARD"),

        Statement::Notify { .. } => GateProfile::recovery("NOTIFY"),
        Statement::Listen { .. } => GateProfile {
            restricted_command: Some("LISTEN"),
            ..GateProfile::recovery("LISTEN")
        },
        Statement::Unlisten { .. } => GateProfile {
            restricted_command: Some("UNLISTEN"),
            ..GateProfile::recovery("UNLISTEN")
        },
        // Allowed in read-only transactions, not during recovery
        Statement::Cluster { .. } => GateProfile::recovery("CLUSTER"),
        Statement::Vacuum(_) => GateProfile::recovery("VACUUM"),
        Statement::Reindex(reindex) => {
            let profile = GateProfile::recovery("REINDEX");
            if reindex.kind == ObjectType::Database {
                profile.block(BlockRule::Forbidden("REINDEX DATABASE"))
            } else {
                profile
            }
        }
        // During recovery this becomes a restartpoint request
        Statement::Checkpoint => GateProfile {
            requires_superuser: Some("CHECKPOINT"),
            ..GateProfile::unrestricted()
        },
        Statement::Lock(_) => GateProfile::unrestricted().block(BlockRule::Required("LOCK TABLE")),

        Statement::CreateDatabase { .. } => {
            GateProfile::mutating().block(BlockRule::Forbidden("CREATE DATABASE"))
        }
        Statement::DropDatabase { .. } => {
            GateProfile::mutating().block(BlockRule::Forbidden("DROP DATABASE"))
        }
        Statement::CreateTablespace { .. } => {
            GateProfile::mutating().block(BlockRule::Forbidden("CREATE TABLESPACE"))
        }
        Statement::DropTablespace { .. } => {
            GateProfile::mutating().block(BlockRule::Forbidden("DROP TABLESPACE"))
        }
        Statement::AlterEnum { .. } => {
            GateProfile::mutating().block(BlockRule::Forbidden("ALTER TYPE ... ADD"))
        }
        Statement::CreateIndex(index) => {
            if index.concurrent {
                GateProfile::mutating().block(BlockRule::Forbidden("CREATE INDEX CONCURRENTLY"))
            } else {
                GateProfile::mutating()
            }
        }

        Statement::CreateSchema(_)
        | Statement::CreateTable(_)
        | Statement::CreateForeignTable(_)
        | Statement::AlterTable(_)
        | Statement::Drop(_)
        | Statement::Truncate(_)
        | Statement::Comment(_)
        | Statement::SecurityLabel { .. }
        | Statement::Rename(_)
        | Statement::AlterObjectSchema(_)
        | Statement::AlterOwner(_)
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
        | Statement::CreateView(_)
        | Statement::CreateFunction { .. }
        | Statement::RemoveFunction(_)
        | Statement::CreateRule(_)
        | Statement::CreateSequence { .. }
        | Statement::AlterSequence { .. }
        | Statement::Grant(_)
        | Statement::GrantRole(_)
        | Statement::AlterDefaultPrivileges { .. }
        | Statement::AlterDatabase { .. }
        | Statement::AlterDatabaseSet { .. }
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
        | Statement::AlterTsConfiguration { .. } => GateProfile::mutating(),
    }
}

fn transaction_profile(statement: &TransactionStatement) -> GateProfile {
    match statement {
        TransactionStatement::Begin { .. }
        | TransactionStatement::Start { .. }
        | TransactionStatement::Commit
        | TransactionStatement::Rollback => GateProfile::unrestricted(),
        TransactionStatement::Savepoint { .. } => {
            GateProfile::unrestricted().block(BlockRule::Required("SAVEPOINT"))
        }
        TransactionStatement::Release { .. } => {
            GateProfile::unrestricted().block(BlockRule::Required("RELEASE SAVEPOINT"))
        }
        TransactionStatement::RollbackTo { .. } => {
            GateProfile::unrestricted().block(BlockRule::Required("ROLLBACK TO SAVEPOINT"))
        }
        TransactionStatement::Prepare { .. } => GateProfile::recovery("PREPARE TRANSACTION")
            .block(BlockRule::TopLevelOnly("PREPARE TRANSACTION")),
        TransactionStatement::CommitPrepared { .. } => GateProfile::recovery("COMMIT PREPARED")
            .block(BlockRule::Forbidden("COMMIT PREPARED")),
        TransactionStatement::RollbackPrepared { .. } => {
            GateProfile::recovery("ROLLBACK PREPARED")
                .block(BlockRule::Forbidden("ROLLBACK PREPARED"))
        }
    }
}

/// Read-only transaction screen; `tag` names the statement in the rejection
pub fn check_read_only(
    statement: &Statement,
    tag: &str,
    context: &ExecutionContext,
) -> UtilityResult<()> {
    if context.transaction_read_only && profile(statement).rejected_when_read_only {
        return Err(UtilityError::ReadOnlyViolation {
            command: tag.to_string(),
        });
    }
    Ok(())
}

/// Recovery, security-restriction, transaction-block and privilege checks
pub fn check_context(
    statement: &Statement,
    context: &ExecutionContext,
    in_transaction_block: bool,
) -> UtilityResult<()> {
    let profile = profile(statement);

    if let Some(command) = profile.recovery_command {
        if context.in_recovery {
            return Err(UtilityError::RecoveryViolation {
                command: command.to_string(),
            });
        }
    }

    if let Some(command) = profile.restricted_command {
        if context.in_security_restricted_operation {
            return Err(UtilityError::SecurityRestrictionViolation {
                command: command.to_string(),
            });
        }
    }

    match profile.block {
        BlockRule::Unrestricted => {}
        BlockRule::Required(command) => {
            // Nested dispatch runs inside its caller's transaction
            if !in_transaction_block && context.is_top_level {
                return Err(UtilityError::TransactionBlockRequired {
                    command: command.to_string(),
                });
            }
        }
        BlockRule::Forbidden(command) => {
            if in_transaction_block || !context.is_top_level {
                return Err(UtilityError::TransactionBlockForbidden {
                    command: command.to_string(),
                });
            }
        }
        BlockRule::TopLevelOnly(command) => {
            if !context.is_top_level {
                return Err(UtilityError::TransactionBlockForbidden {
                    command: command.to_string(),
                });
            }
        }
    }

    if let Some(command) = profile.requires_superuser {
        if !context.superuser {
            return Err(UtilityError::InsufficientPrivilege {
                command: command.to_string(),
            });
        }
    }

    Ok(())
}
