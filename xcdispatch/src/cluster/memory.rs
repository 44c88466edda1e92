// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory cluster implementing every dispatcher collaborator

use super::journal::{ClusterEvent, Journal};
use crate::ast::{
    AlterTableStatement, CleanConnectionStatement, CreateForeignTableStatement,
    CreateTableStatement, QualifiedName, QueryCommand, Statement, StatementKind, TransactionOption,
};
use crate::classify::{
    log_level, LogStmtLevel, NoSessionObjects, PreparedStatementInfo, SessionObjectLookup,
};
use crate::exec::dispatcher::Collaborators;
use crate::exec::error::{UtilityError, UtilityResult};
use crate::exec::handlers::{CommandHandlers, HandlerOutcome, RelationId, ResultSink};
use crate::routing::{
    CatalogLookup, ClusterTopology, NodeId, PoolerChannel, RelationKind, RemoteExecutionRequest,
    RemoteTransport, TransportError,
};
use crate::txn::{
    BarrierTransport, ClusterParticipants, GlobalTransactionManager, LocalTransactionManager,
    PreparedOutcome, PreparedTransaction, TransactionState, TransactionStatus,
};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Session state of the local backend; lost on restart
#[derive(Debug, Default)]
struct SessionState {
    in_block: bool,
    failed: bool,
    touched_catalog: bool,
    options: Vec<TransactionOption>,
    savepoints: Vec<String>,
    status: TransactionStatus,
    global_id: Option<String>,
    /// Remote nodes written by the current transaction
    written: BTreeSet<NodeId>,
    prepared_statements: HashMap<String, PreparedStatementInfo>,
    portals: HashMap<String, bool>,
}

#[derive(Debug, Default)]
struct Faults {
    prepare: BTreeSet<NodeId>,
    rollback_prepared: BTreeSet<NodeId>,
    transport: BTreeSet<NodeId>,
    barrier: BTreeSet<NodeId>,
    gtm_unavailable: bool,
    handlers: HashMap<StatementKind, String>,
    pooler_status: i32,
}

#[derive(Debug, Clone)]
struct GlobalEntry {
    transaction: PreparedTransaction,
    status: TransactionStatus,
}

/// Reference cluster: one local node plus simulated remote nodes.
///
/// Everything outside `SessionState` survives [`MemoryCluster::restart_coordinator`].
pub struct MemoryCluster {
    topology: ClusterTopology,
    journal: Journal,
    session: Mutex<SessionState>,
    faults: Mutex<Faults>,
    relations: Mutex<HashMap<String, RelationKind>>,
    expansions: Mutex<HashMap<StatementKind, Vec<Statement>>>,
    row_counts: Mutex<HashMap<StatementKind, u64>>,
    /// Two-phase records written on the local node
    local_prepared: Mutex<BTreeSet<String>>,
    /// Prepared branches on remote nodes, by gid
    remote_prepared: Mutex<HashMap<String, BTreeSet<NodeId>>>,
    global: Mutex<HashMap<String, GlobalEntry>>,
    next_relation: Mutex<u32>,
    barrier_lock: Arc<RwLock<()>>,
}

impl MemoryCluster {
    pub fn new(topology: ClusterTopology) -> Self {
        Self {
            topology,
            journal: Journal::new(),
            session: Mutex::new(SessionState::default()),
            faults: Mutex::new(Faults::default()),
            relations: Mutex::new(HashMap::new()),
            expansions: Mutex::new(HashMap::new()),
            row_counts: Mutex::new(HashMap::new()),
            local_prepared: Mutex::new(BTreeSet::new()),
            remote_prepared: Mutex::new(HashMap::new()),
            global: Mutex::new(HashMap::new()),
            next_relation: Mutex::new(16384),
            barrier_lock: Arc::new(RwLock::new(())),
        }
    }

    /// Wire every collaborator of a dispatcher to this cluster
    pub fn collaborators(cluster: &Arc<Self>) -> Collaborators {
        Collaborators {
            handlers: cluster.clone(),
            transactions: cluster.clone(),
            participants: cluster.clone(),
            gtm: cluster.clone(),
            transport: cluster.clone(),
            pooler: cluster.clone(),
            catalog: cluster.clone(),
            barrier: cluster.clone(),
            session: cluster.clone(),
            barrier_lock: cluster.barrier_lock.clone(),
        }
    }

    pub fn topology(&self) -> &ClusterTopology {
        &self.topology
    }

    // ---- configuration ----

    pub fn set_relation(&self, name: &str, kind: RelationKind) {
        self.relations
            .lock()
            .insert(QualifiedName::from(name).to_string(), kind);
    }

    /// Statements returned by `expand` for a statement kind. Without one, the
    /// statement expands to itself.
    pub fn set_expansion(&self, kind: StatementKind, statements: Vec<Statement>) {
        self.expansions.lock().insert(kind, statements);
    }

    pub fn set_row_count(&self, kind: StatementKind, rows: u64) {
        self.row_counts.lock().insert(kind, rows);
    }

    /// Mark remote nodes as written by the current transaction
    pub fn touch_nodes(&self, nodes: &[NodeId]) {
        self.session.lock().written.extend(nodes.iter().cloned());
    }

    // ---- fault injection ----

    pub fn fail_prepare_on(&self, node: &NodeId) {
        self.faults.lock().prepare.insert(node.clone());
    }

    pub fn fail_rollback_prepared_on(&self, node: &NodeId) {
        self.faults.lock().rollback_prepared.insert(node.clone());
    }

    pub fn fail_transport_to(&self, node: &NodeId) {
        self.faults.lock().transport.insert(node.clone());
    }

    pub fn fail_barrier_on(&self, node: &NodeId) {
        self.faults.lock().barrier.insert(node.clone());
    }

    /// Make the GTM refuse new registrations
    pub fn fail_gtm_record(&self) {
        self.faults.lock().gtm_unavailable = true;
    }

    pub fn fail_handler(&self, kind: StatementKind, message: &str) {
        self.faults.lock().handlers.insert(kind, message.to_string());
    }

    pub fn set_pooler_status(&self, status: i32) {
        self.faults.lock().pooler_status = status;
    }

    pub fn clear_faults(&self) {
        *self.faults.lock() = Faults::default();
    }

    // ---- inspection ----

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn events(&self) -> Vec<ClusterEvent> {
        self.journal.events()
    }

    pub fn remote_requests(&self) -> Vec<RemoteExecutionRequest> {
        self.journal
            .events()
            .into_iter()
            .filter_map(|event| match event {
                ClusterEvent::Remote(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn handler_calls(&self) -> Vec<StatementKind> {
        self.journal
            .events()
            .into_iter()
            .filter_map(|event| match event {
                ClusterEvent::Handler(kind) => Some(kind),
                _ => None,
            })
            .collect()
    }

    pub fn is_locally_prepared(&self, gid: &str) -> bool {
        self.local_prepared.lock().contains(gid)
    }

    /// Remote nodes still holding a prepared branch for the gid
    pub fn remote_prepared(&self, gid: &str) -> Vec<NodeId> {
        self.remote_prepared
            .lock()
            .get(gid)
            .map(|nodes| nodes.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Simulate a coordinator crash and restart: session state is lost,
    /// durable two-phase records and remote nodes are not
    pub fn restart_coordinator(&self) {
        *self.session.lock() = SessionState::default();
        log::info!("Coordinator {} restarted", self.topology.local_node);
    }

    fn reset_transaction(session: &mut SessionState, status: TransactionStatus) {
        session.in_block = false;
        session.failed = false;
        session.touched_catalog = false;
        session.options.clear();
        session.savepoints.clear();
        session.written.clear();
        session.status = status;
    }

    fn track_session_objects(&self, statement: &Statement) {
        let mut session = self.session.lock();
        match statement {
            Statement::Prepare(prepare) => {
                let returns_tuples = matches!(
                    prepare.query.as_ref(),
                    Statement::Query(query) if query.command == QueryCommand::Select
                );
                session.prepared_statements.insert(
                    prepare.name.clone(),
                    PreparedStatementInfo {
                        statement: (*prepare.query).clone(),
                        returns_tuples,
                    },
                );
            }
            Statement::Deallocate { name } => match name {
                Some(name) => {
                    session.prepared_statements.remove(name);
                }
                None => session.prepared_statements.clear(),
            },
            Statement::Query(query) => {
                if let Some(cursor) = &query.cursor {
                    session.portals.insert(cursor.name.clone(), true);
                }
            }
            Statement::ClosePortal { portal } => match portal {
                Some(portal) => {
                    session.portals.remove(portal);
                }
                None => session.portals.clear(),
            },
            _ => {}
        }
    }

    fn track_relations(&self, statement: &Statement) {
        let mut relations = self.relations.lock();
        match statement {
            Statement::CreateView(view) => {
                relations.insert(view.name.to_string(), RelationKind::View);
            }
            Statement::CreateSequence { name } => {
                relations.insert(name.to_string(), RelationKind::Sequence);
            }
            Statement::CreateIndex(index) => {
                if let Some(name) = &index.name {
                    relations.insert(name.clone(), RelationKind::Index);
                }
            }
            Statement::Drop(drop) => {
                for object in &drop.objects {
                    relations.remove(&object.to_string());
                }
            }
            Statement::Rename(rename) => {
                if let Some(kind) = relations.remove(&rename.object.to_string()) {
                    let renamed = QualifiedName {
                        schema: rename.object.schema.clone(),
                        name: rename.new_name.clone(),
                    };
                    relations.insert(renamed.to_string(), kind);
                }
            }
            _ => {}
        }
    }

    fn handler_fault(&self, kind: StatementKind) -> UtilityResult<()> {
        let message = self.faults.lock().handlers.get(&kind).cloned();
        if let Some(message) = message {
            let mut session = self.session.lock();
            if session.in_block {
                session.failed = true;
            }
            return Err(UtilityError::Handler(message));
        }
        Ok(())
    }

    fn transport_fault(&self, node: &NodeId) -> Result<(), TransportError> {
        if self.faults.lock().transport.contains(node) {
            return Err(TransportError::Unreachable {
                node: node.clone(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(())
    }

    fn barrier_fault(&self, node: &NodeId) -> Result<(), TransportError> {
        if self.faults.lock().barrier.contains(node) {
            return Err(TransportError::Remote {
                node: node.clone(),
                message: "barrier rejected".to_string(),
            });
        }
        Ok(())
    }

    fn mark_catalog_write(&self) {
        let mut session = self.session.lock();
        if session.in_block {
            session.touched_catalog = true;
        }
    }
}

impl CommandHandlers for MemoryCluster {
    fn execute(
        &self,
        statement: &Statement,
        _query_text: &str,
        _params: &[Value],
        dest: &mut dyn ResultSink,
    ) -> UtilityResult<HandlerOutcome> {
        let kind = statement.kind();
        self.handler_fault(kind)?;
        self.journal.record(ClusterEvent::Handler(kind));

        if log_level(statement, &NoSessionObjects) == LogStmtLevel::Ddl {
            self.mark_catalog_write();
        }
        self.track_session_objects(statement);
        self.track_relations(statement);

        match statement {
            Statement::VariableShow { name } => {
                dest.send_row(vec![Value::String(format!("<{}>", name))]);
            }
            Statement::Explain(explain) => {
                dest.send_row(vec![Value::String(format!(
                    "Utility plan for {:?}",
                    explain.query.kind()
                ))]);
            }
            _ => {}
        }

        let configured = self.row_counts.lock().get(&kind).copied();
        let rows_processed = match statement {
            Statement::Fetch(fetch) => configured
                .or_else(|| fetch.count.map(|count| count.max(0) as u64))
                .or(Some(0)),
            Statement::Copy(_) => configured.or(Some(0)),
            _ => configured,
        };
        Ok(HandlerOutcome { rows_processed })
    }

    fn expand(&self, statement: &Statement, _query_text: &str) -> UtilityResult<Vec<Statement>> {
        let configured = self.expansions.lock().get(&statement.kind()).cloned();
        Ok(configured.unwrap_or_else(|| vec![statement.clone()]))
    }

    fn define_relation(
        &self,
        statement: &CreateTableStatement,
        kind: RelationKind,
    ) -> UtilityResult<RelationId> {
        let name = statement.relation.to_string();
        {
            let relations = self.relations.lock();
            if relations.contains_key(&name) && !statement.if_not_exists {
                return Err(UtilityError::Handler(format!(
                    "relation \"{}\" already exists",
                    name
                )));
            }
        }
        self.journal.record(ClusterEvent::DefineRelation {
            relation: name.clone(),
            kind,
        });
        self.relations.lock().insert(name, kind);
        self.mark_catalog_write();

        let mut next = self.next_relation.lock();
        let id = RelationId(*next);
        *next += 1;
        Ok(id)
    }

    fn create_secondary_storage(
        &self,
        _relation: RelationId,
        statement: &CreateTableStatement,
    ) -> UtilityResult<()> {
        self.journal.record(ClusterEvent::SecondaryStorage {
            relation: statement.relation.to_string(),
        });
        Ok(())
    }

    fn create_foreign_table(
        &self,
        _relation: RelationId,
        statement: &CreateForeignTableStatement,
    ) -> UtilityResult<()> {
        self.journal.record(ClusterEvent::ForeignTable {
            relation: statement.table.relation.to_string(),
        });
        Ok(())
    }

    fn alter_table(&self, statement: &AlterTableStatement) -> UtilityResult<()> {
        self.handler_fault(StatementKind::AlterTable)?;
        self.journal.record(ClusterEvent::AlterTable {
            relation: statement.relation.to_string(),
        });
        self.mark_catalog_write();
        Ok(())
    }

    fn check_relation_ownership(&self, relation: &QualifiedName) -> UtilityResult<()> {
        self.journal.record(ClusterEvent::OwnershipCheck {
            relation: relation.to_string(),
        });
        Ok(())
    }

    fn request_checkpoint(&self, restartpoint: bool) -> UtilityResult<()> {
        self.journal.record(ClusterEvent::Checkpoint { restartpoint });
        Ok(())
    }
}

impl LocalTransactionManager for MemoryCluster {
    fn is_transaction_block(&self) -> bool {
        self.session.lock().in_block
    }

    fn is_failed_block(&self) -> bool {
        let session = self.session.lock();
        session.in_block && session.failed
    }

    fn begin_block(&self) -> UtilityResult<()> {
        let mut session = self.session.lock();
        if session.in_block {
            log::warn!("there is already a transaction in progress");
            return Ok(());
        }
        session.in_block = true;
        session.status = TransactionStatus::InProgress;
        session.global_id = None;
        drop(session);
        self.journal.record(ClusterEvent::LocalBegin);
        Ok(())
    }

    fn set_option(&self, option: &TransactionOption) -> UtilityResult<()> {
        self.session.lock().options.push(*option);
        Ok(())
    }

    fn end_block(&self) -> UtilityResult<bool> {
        let mut session = self.session.lock();
        if !session.in_block {
            log::warn!("there is no transaction in progress");
            return Ok(true);
        }
        let committed = !session.failed;
        let status = if committed {
            TransactionStatus::Committed
        } else {
            TransactionStatus::Aborted
        };
        Self::reset_transaction(&mut session, status);
        drop(session);

        self.journal.record(if committed {
            ClusterEvent::LocalCommit
        } else {
            ClusterEvent::LocalAbort
        });
        Ok(committed)
    }

    fn user_abort_block(&self) -> UtilityResult<()> {
        let mut session = self.session.lock();
        if !session.in_block {
            log::warn!("there is no transaction in progress");
            return Ok(());
        }
        Self::reset_transaction(&mut session, TransactionStatus::Aborted);
        drop(session);
        self.journal.record(ClusterEvent::LocalAbort);
        Ok(())
    }

    fn prepare_block(&self, gid: &str) -> UtilityResult<bool> {
        let mut session = self.session.lock();
        if !session.in_block {
            log::warn!("there is no transaction in progress");
            return Ok(false);
        }
        if session.failed {
            Self::reset_transaction(&mut session, TransactionStatus::Aborted);
            drop(session);
            self.journal.record(ClusterEvent::LocalAbort);
            return Ok(false);
        }

        let mut prepared = self.local_prepared.lock();
        if prepared.contains(gid) {
            return Err(UtilityError::GlobalTransactionInUse {
                gid: gid.to_string(),
            });
        }
        prepared.insert(gid.to_string());
        drop(prepared);

        Self::reset_transaction(&mut session, TransactionStatus::Prepared);
        session.global_id = Some(gid.to_string());
        drop(session);
        self.journal.record(ClusterEvent::LocalPrepare {
            gid: gid.to_string(),
        });
        Ok(true)
    }

    fn finish_prepared(&self, gid: &str, commit: bool) -> UtilityResult<()> {
        if !self.local_prepared.lock().remove(gid) {
            return Err(UtilityError::UnknownGlobalTransaction {
                gid: gid.to_string(),
            });
        }

        let mut session = self.session.lock();
        let status = if commit {
            TransactionStatus::Committed
        } else {
            TransactionStatus::Aborted
        };
        if session.global_id.as_deref() == Some(gid) && session.status.can_transition_to(status) {
            session.status = status;
        }
        drop(session);

        self.journal.record(ClusterEvent::LocalFinishPrepared {
            gid: gid.to_string(),
            commit,
        });
        Ok(())
    }

    fn define_savepoint(&self, name: &str) -> UtilityResult<()> {
        self.session.lock().savepoints.push(name.to_string());
        self.journal.record(ClusterEvent::Savepoint {
            name: name.to_string(),
        });
        Ok(())
    }

    fn release_savepoint(&self, name: &str) -> UtilityResult<()> {
        let mut session = self.session.lock();
        let position = savepoint_position(&session.savepoints, name)?;
        session.savepoints.truncate(position);
        Ok(())
    }

    fn rollback_to_savepoint(&self, name: &str) -> UtilityResult<()> {
        let mut session = self.session.lock();
        let position = savepoint_position(&session.savepoints, name)?;
        session.savepoints.truncate(position + 1);
        session.failed = false;
        Ok(())
    }

    fn command_counter_increment(&self) {
        self.journal.record(ClusterEvent::CommandCounterIncrement);
    }

    fn touched_catalog(&self) -> bool {
        self.session.lock().touched_catalog
    }

    fn state(&self) -> TransactionState {
        let session = self.session.lock();
        TransactionState {
            status: session.status,
            global_id: session.global_id.clone(),
        }
    }
}

fn savepoint_position(savepoints: &[String], name: &str) -> UtilityResult<usize> {
    savepoints
        .iter()
        .rposition(|savepoint| savepoint == name)
        .ok_or_else(|| UtilityError::Handler(format!("savepoint \"{}\" does not exist", name)))
}

impl ClusterParticipants for MemoryCluster {
    fn begin(&self, begin_query: Option<&str>) -> Result<(), TransportError> {
        self.journal.record(ClusterEvent::RemoteBegin {
            begin_query: begin_query.map(str::to_string),
        });
        Ok(())
    }

    fn participants(&self) -> Vec<NodeId> {
        self.session.lock().written.iter().cloned().collect()
    }

    fn prepare(&self, node: &NodeId, gid: &str) -> Result<(), TransportError> {
        self.transport_fault(node)?;
        if self.faults.lock().prepare.contains(node) {
            return Err(TransportError::Remote {
                node: node.clone(),
                message: "could not prepare transaction".to_string(),
            });
        }
        self.remote_prepared
            .lock()
            .entry(gid.to_string())
            .or_default()
            .insert(node.clone());
        self.journal.record(ClusterEvent::ParticipantPrepare {
            node: node.clone(),
            gid: gid.to_string(),
        });
        Ok(())
    }

    fn finish_prepared(
        &self,
        node: &NodeId,
        gid: &str,
        commit: bool,
    ) -> Result<(), TransportError> {
        self.transport_fault(node)?;
        if !commit && self.faults.lock().rollback_prepared.contains(node) {
            return Err(TransportError::Timeout { node: node.clone() });
        }

        let mut remote = self.remote_prepared.lock();
        let removed = remote
            .get_mut(gid)
            .map(|nodes| nodes.remove(node))
            .unwrap_or(false);
        if !removed {
            return Err(TransportError::Remote {
                node: node.clone(),
                message: format!("prepared transaction \"{}\" does not exist", gid),
            });
        }
        if remote.get(gid).is_some_and(|nodes| nodes.is_empty()) {
            remote.remove(gid);
        }
        drop(remote);

        self.journal.record(ClusterEvent::ParticipantFinish {
            node: node.clone(),
            gid: gid.to_string(),
            commit,
        });
        Ok(())
    }

    fn abort(&self) -> Result<(), TransportError> {
        self.session.lock().written.clear();
        self.journal.record(ClusterEvent::ParticipantAbort);
        Ok(())
    }
}

impl GlobalTransactionManager for MemoryCluster {
    fn record_prepared(&self, transaction: PreparedTransaction) -> UtilityResult<()> {
        if self.faults.lock().gtm_unavailable {
            return Err(UtilityError::Propagation(TransportError::Unreachable {
                node: NodeId::from("gtm"),
                reason: "connection refused".to_string(),
            }));
        }
        let mut global = self.global.lock();
        if let Some(existing) = global.get(&transaction.gid) {
            if !existing.status.is_terminal() {
                return Err(UtilityError::GlobalTransactionInUse {
                    gid: transaction.gid,
                });
            }
        }
        global.insert(
            transaction.gid.clone(),
            GlobalEntry {
                transaction,
                status: TransactionStatus::Prepared,
            },
        );
        Ok(())
    }

    fn lookup_prepared(&self, gid: &str) -> Option<PreparedTransaction> {
        self.global
            .lock()
            .get(gid)
            .filter(|entry| entry.status == TransactionStatus::Prepared)
            .map(|entry| entry.transaction.clone())
    }

    fn finish_participant(&self, gid: &str, node: &NodeId, commit: bool) {
        if let Some(entry) = self.global.lock().get_mut(gid) {
            entry.transaction.participants.retain(|participant| participant != node);
            entry.transaction.outcome = PreparedOutcome::from_commit(commit);
        }
    }

    fn complete(&self, gid: &str, status: TransactionStatus) {
        let mut global = self.global.lock();
        let Some(entry) = global.get_mut(gid) else {
            log::warn!("GTM has no transaction \"{}\" to complete", gid);
            return;
        };
        if !entry.status.can_transition_to(status) {
            log::warn!(
                "GTM ignored transition of \"{}\" from {} to {}",
                gid,
                entry.status,
                status
            );
            return;
        }
        entry.status = status;
    }

    fn status(&self, gid: &str) -> Option<TransactionStatus> {
        self.global.lock().get(gid).map(|entry| entry.status)
    }
}

impl RemoteTransport for MemoryCluster {
    fn execute_on_nodes(&self, request: &RemoteExecutionRequest) -> Result<(), TransportError> {
        let members = self.topology.members(request.node_group);
        for node in &members {
            self.transport_fault(node)?;
        }
        self.journal.record(ClusterEvent::Remote(request.clone()));

        let mut session = self.session.lock();
        if session.in_block && !request.force_autocommit {
            session.written.extend(members);
        }
        Ok(())
    }
}

impl PoolerChannel for MemoryCluster {
    fn set_session_option(&self, is_local: bool, text: &str) -> i32 {
        self.journal.record(ClusterEvent::PoolerSet {
            is_local,
            text: text.to_string(),
        });
        self.faults.lock().pooler_status
    }

    fn clean_connections(&self, request: &CleanConnectionStatement) -> Result<(), TransportError> {
        self.journal.record(ClusterEvent::PoolerClean {
            database: request.database.clone(),
        });
        Ok(())
    }
}

impl CatalogLookup for MemoryCluster {
    fn resolve_relation_kind(&self, name: &QualifiedName) -> UtilityResult<RelationKind> {
        self.relations
            .lock()
            .get(&name.to_string())
            .copied()
            .ok_or_else(|| UtilityError::RelationNotFound {
                name: name.to_string(),
            })
    }
}

impl BarrierTransport for MemoryCluster {
    fn prepare_barrier(&self, node: &NodeId, id: &str) -> Result<(), TransportError> {
        self.transport_fault(node)?;
        self.barrier_fault(node)?;
        self.journal.record(ClusterEvent::BarrierPrepare {
            node: node.clone(),
            id: id.to_string(),
        });
        Ok(())
    }

    fn execute_barrier(&self, node: &NodeId, id: &str) -> Result<(), TransportError> {
        self.transport_fault(node)?;
        self.journal.record(ClusterEvent::BarrierExecute {
            node: node.clone(),
            id: id.to_string(),
        });
        Ok(())
    }

    fn end_barrier(&self, node: &NodeId, id: &str) -> Result<(), TransportError> {
        self.journal.record(ClusterEvent::BarrierEnd {
            node: node.clone(),
            id: id.to_string(),
        });
        Ok(())
    }

    fn record_local(&self, id: &str) -> UtilityResult<()> {
        self.journal.record(ClusterEvent::BarrierRecord { id: id.to_string() });
        Ok(())
    }
}

impl SessionObjectLookup for MemoryCluster {
    fn prepared_statement(&self, name: &str) -> Option<PreparedStatementInfo> {
        self.session.lock().prepared_statements.get(name).cloned()
    }

    fn portal_returns_tuples(&self, name: &str) -> Option<bool> {
        self.session.lock().portals.get(name).copied()
    }
}
