// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Local transaction manager interface

use super::state::TransactionState;
use crate::ast::TransactionOption;
use crate::exec::error::UtilityResult;

/// Backend transaction manager of this node.
///
/// Methods take `&self`; implementations keep their own interior state.
pub trait LocalTransactionManager: Send + Sync {
    /// An explicit transaction block is open
    fn is_transaction_block(&self) -> bool;

    /// The open block hit an error and can only be rolled back
    fn is_failed_block(&self) -> bool;

    fn begin_block(&self) -> UtilityResult<()>;

    fn set_option(&self, option: &TransactionOption) -> UtilityResult<()>;

    /// End the block. Returns false when the commit became a rollback
    /// because the transaction had already failed.
    fn end_block(&self) -> UtilityResult<bool>;

    fn user_abort_block(&self) -> UtilityResult<()>;

    /// Persist the local two-phase record. Returns false when the
    /// transaction was rolled back instead.
    fn prepare_block(&self, gid: &str) -> UtilityResult<bool>;

    /// Finish a locally prepared transaction
    fn finish_prepared(&self, gid: &str, commit: bool) -> UtilityResult<()>;

    fn define_savepoint(&self, name: &str) -> UtilityResult<()>;

    fn release_savepoint(&self, name: &str) -> UtilityResult<()>;

    fn rollback_to_savepoint(&self, name: &str) -> UtilityResult<()>;

    /// Make effects of earlier commands visible to later ones
    fn command_counter_increment(&self);

    /// The current transaction wrote catalog state on this node
    fn touched_catalog(&self) -> bool;

    fn state(&self) -> TransactionState;
}
