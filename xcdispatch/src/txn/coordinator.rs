// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transaction control and two-phase commit
//!
//! Protocol for PREPARE TRANSACTION on a client-facing coordinator:
//! 1. **Prepare phase**: every remote participant prepares under the gid.
//!    If one fails, the ones already prepared are rolled back and the local
//!    transaction aborts.
//! 2. **Record**: the coordinator writes its own two-phase record only when
//!    the transaction touched catalog state here; otherwise it commits
//!    locally. The gid and its participants are then registered with the
//!    GTM. A failure in this phase rolls back every prepared branch.
//!
//! COMMIT / ROLLBACK PREPARED fans out to the registered participants and
//! finishes locally afterwards. Each finished branch leaves the GTM record
//! and fixes the outcome, so an interrupted finish can be retried but not
//! reversed.

use super::isolation::rewrite_begin_query;
use super::manager::LocalTransactionManager;
use super::participants::{ClusterParticipants, GlobalTransactionManager, PreparedTransaction};
use super::state::TransactionStatus;
use crate::ast::{TransactionOption, TransactionStatement};
use crate::exec::completion::CompletionTag;
use crate::exec::context::ExecutionContext;
use crate::exec::error::{UtilityError, UtilityResult};
use crate::routing::NodeId;
use parking_lot::RwLock;
use std::sync::Arc;

pub struct TransactionCoordinator {
    local: Arc<dyn LocalTransactionManager>,
    participants: Arc<dyn ClusterParticipants>,
    gtm: Arc<dyn GlobalTransactionManager>,
    /// Shared by prepared-transaction finishes, exclusive for BARRIER
    barrier_lock: Arc<RwLock<()>>,
}

impl TransactionCoordinator {
    pub fn new(
        local: Arc<dyn LocalTransactionManager>,
        participants: Arc<dyn ClusterParticipants>,
        gtm: Arc<dyn GlobalTransactionManager>,
        barrier_lock: Arc<RwLock<()>>,
    ) -> Self {
        Self {
            local,
            participants,
            gtm,
            barrier_lock,
        }
    }

    pub fn execute(
        &self,
        statement: &TransactionStatement,
        context: &ExecutionContext,
        completion_tag: Option<&mut CompletionTag>,
    ) -> UtilityResult<()> {
        match statement {
            TransactionStatement::Begin { options } | TransactionStatement::Start { options } => {
                self.begin(options, context)
            }
            TransactionStatement::Commit => {
                if !self.local.end_block()? {
                    log::info!("COMMIT of a failed transaction rolled back");
                    set_tag(completion_tag, "ROLLBACK");
                }
                Ok(())
            }
            TransactionStatement::Rollback => self.local.user_abort_block(),
            TransactionStatement::Savepoint { name } => self.local.define_savepoint(name),
            TransactionStatement::Release { name } => self.local.release_savepoint(name),
            TransactionStatement::RollbackTo { name } => self.local.rollback_to_savepoint(name),
            TransactionStatement::Prepare { gid } => {
                self.prepare_transaction(gid, context, completion_tag)
            }
            TransactionStatement::CommitPrepared { gid } => {
                self.finish_prepared(gid, true, context)
            }
            TransactionStatement::RollbackPrepared { gid } => {
                self.finish_prepared(gid, false, context)
            }
        }
    }

    fn begin(&self, options: &[TransactionOption], context: &ExecutionContext) -> UtilityResult<()> {
        if context.propagates() {
            let begin_query = rewrite_begin_query(options);
            self.participants.begin(begin_query.as_deref())?;
        }

        self.local.begin_block()?;
        for option in options {
            self.local.set_option(option)?;
        }
        log::debug!("Transaction block started with {} option(s)", options.len());
        Ok(())
    }

    fn prepare_transaction(
        &self,
        gid: &str,
        context: &ExecutionContext,
        completion_tag: Option<&mut CompletionTag>,
    ) -> UtilityResult<()> {
        // Routed here by a coordinator: this node is a participant
        if !context.is_client_facing_coordinator() {
            if !self.local.prepare_block(gid)? {
                set_tag(completion_tag, "ROLLBACK");
            }
            return Ok(());
        }

        if self.gtm.lookup_prepared(gid).is_some() {
            return Err(UtilityError::GlobalTransactionInUse {
                gid: gid.to_string(),
            });
        }

        // A failed block rolls back without preparing anything remotely
        if self.local.is_failed_block() {
            log::info!("PREPARE TRANSACTION '{}' of a failed transaction rolled back", gid);
            if let Err(e) = self.participants.abort() {
                log::warn!("Abort of participants of '{}' failed: {}", gid, e);
            }
            self.local.prepare_block(gid)?;
            set_tag(completion_tag, "ROLLBACK");
            return Ok(());
        }

        // Phase 1: prepare every remote participant
        let mut prepared: Vec<NodeId> = Vec::new();
        for node in self.participants.participants() {
            if let Err(e) = self.participants.prepare(&node, gid) {
                log::warn!("Prepare of '{}' failed: {}", gid, e);
                self.roll_back_prepared(gid, &prepared);
                return Err(UtilityError::ParticipantPrepareFailed {
                    gid: gid.to_string(),
                    node: e.node().clone(),
                    reason: e.to_string(),
                });
            }
            prepared.push(node);
        }

        // Phase 2: end the local side, then register the gid
        let coordinator_record = self.local.touched_catalog();
        let completed = if coordinator_record {
            self.local.prepare_block(gid)
        } else {
            // Nothing here needs to survive a crash; participants hold the
            // prepared branches
            self.local.end_block()
        };
        match completed {
            Ok(true) => {}
            Ok(false) => {
                self.roll_back_prepared(gid, &prepared);
                set_tag(completion_tag, "ROLLBACK");
                return Ok(());
            }
            Err(e) => {
                log::warn!("Local prepare of '{}' failed: {}", gid, e);
                self.roll_back_prepared(gid, &prepared);
                return Err(e);
            }
        }

        let registered = self.gtm.record_prepared(PreparedTransaction::new(
            gid,
            prepared.clone(),
            coordinator_record,
        ));
        if let Err(e) = registered {
            log::warn!("GTM registration of '{}' failed: {}", gid, e);
            if coordinator_record {
                if let Err(e) = self.local.finish_prepared(gid, false) {
                    log::warn!("Local rollback of prepared '{}' failed: {}", gid, e);
                }
            }
            self.roll_back_prepared(gid, &prepared);
            return Err(e);
        }

        log::info!(
            "Prepared transaction '{}' on {} participant(s) (coordinator record: {})",
            gid,
            prepared.len(),
            coordinator_record
        );
        Ok(())
    }

    /// Roll back the branches phase 1 prepared and abort the local transaction.
    /// Branches whose rollback fails are registered as rollback-only so a
    /// later ROLLBACK PREPARED can reach them.
    fn roll_back_prepared(&self, gid: &str, prepared: &[NodeId]) {
        let mut in_doubt = Vec::new();
        for node in prepared {
            if let Err(e) = self.participants.finish_prepared(node, gid, false) {
                log::warn!("Rollback of prepared '{}' on {} failed: {}", gid, node, e);
                in_doubt.push(node.clone());
            }
        }

        if !in_doubt.is_empty() {
            let registered = self
                .gtm
                .record_prepared(PreparedTransaction::rollback_only(gid, in_doubt));
            if let Err(e) = registered {
                log::error!("Could not register in-doubt participants of '{}': {}", gid, e);
            }
        }

        if let Err(e) = self.participants.abort() {
            log::warn!("Abort of remaining participants of '{}' failed: {}", gid, e);
        }
        if let Err(e) = self.local.user_abort_block() {
            log::warn!("Local abort after failed prepare of '{}' failed: {}", gid, e);
        }
    }

    fn finish_prepared(
        &self,
        gid: &str,
        commit: bool,
        context: &ExecutionContext,
    ) -> UtilityResult<()> {
        let _guard = self.barrier_lock.read();

        if !context.is_client_facing_coordinator() {
            return self.local.finish_prepared(gid, commit);
        }

        let transaction =
            self.gtm
                .lookup_prepared(gid)
                .ok_or_else(|| UtilityError::UnknownGlobalTransaction {
                    gid: gid.to_string(),
                })?;
        if !transaction.outcome.allows(commit) {
            return Err(UtilityError::PreparedOutcomeConflict {
                gid: gid.to_string(),
                outcome: transaction.outcome,
            });
        }

        // Finished branches leave the GTM record, so a retry resumes here
        for node in &transaction.participants {
            self.participants
                .finish_prepared(node, gid, commit)
                .map_err(|e| UtilityError::ParticipantFinishFailed {
                    gid: gid.to_string(),
                    node: node.clone(),
                    reason: e.to_string(),
                })?;
            self.gtm.finish_participant(gid, node, commit);
        }

        if transaction.coordinator_record {
            self.local.finish_prepared(gid, commit)?;
        }

        let status = if commit {
            TransactionStatus::Committed
        } else {
            TransactionStatus::Aborted
        };
        self.gtm.complete(gid, status);
        log::info!("Prepared transaction '{}' {}", gid, status);
        Ok(())
    }
}

fn set_tag(completion_tag: Option<&mut CompletionTag>, value: &str) {
    if let Some(tag) = completion_tag {
        tag.set(value);
    }
}
