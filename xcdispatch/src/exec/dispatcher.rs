// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Utility dispatcher
//!
//! Entry point for every non-query statement: classify, gate, execute locally
//! (recursing into expanded sub-statements) and propagate to the nodes that
//! must also apply the statement.

use super::completion::CompletionTag;
use super::context::ExecutionContext;
use super::error::{UtilityError, UtilityResult};
use super::gate;
use super::handlers::{CommandHandlers, HandlerOutcome, NoneSink, ResultSink};
use super::interceptor::UtilityInterceptor;
use crate::ast::{CleanConnectionStatement, CreateSchemaStatement, ObjectType, Statement};
use crate::classify::{classify_with, Classification, SessionObjectLookup, UNKNOWN_TAG};
use crate::config::DispatcherConfig;
use crate::routing::{
    CatalogLookup, NodeGroup, NodeTargetResolver, PoolerChannel, PropagationPlan,
    PropagationTiming, RelationKind, RemotePropagator, RemoteTransport,
};
use crate::txn::{
    BarrierCoordinator, BarrierTransport, ClusterParticipants, GlobalTransactionManager,
    LocalTransactionManager, TransactionCoordinator,
};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

/// External collaborators of the dispatcher
#[derive(Clone)]
pub struct Collaborators {
    pub handlers: Arc<dyn CommandHandlers>,
    pub transactions: Arc<dyn LocalTransactionManager>,
    pub participants: Arc<dyn ClusterParticipants>,
    pub gtm: Arc<dyn GlobalTransactionManager>,
    pub transport: Arc<dyn RemoteTransport>,
    pub pooler: Arc<dyn PoolerChannel>,
    pub catalog: Arc<dyn CatalogLookup>,
    pub barrier: Arc<dyn BarrierTransport>,
    pub session: Arc<dyn SessionObjectLookup + Send + Sync>,
    /// Process-wide lock serializing BARRIER against prepared-transaction finishes
    pub barrier_lock: Arc<RwLock<()>>,
}

/// One dispatch request
pub struct UtilityCall<'a> {
    pub statement: &'a Statement,
    /// Original statement text, forwarded verbatim to remote nodes
    pub query_text: &'a str,
    pub params: &'a [Value],
    pub context: ExecutionContext,
    pub dest: &'a mut dyn ResultSink,
    pub completion_tag: Option<&'a mut CompletionTag>,
}

impl<'a> UtilityCall<'a> {
    pub fn new(
        statement: &'a Statement,
        query_text: &'a str,
        context: ExecutionContext,
        dest: &'a mut dyn ResultSink,
    ) -> Self {
        Self {
            statement,
            query_text,
            params: &[],
            context,
            dest,
            completion_tag: None,
        }
    }

    pub fn with_params(mut self, params: &'a [Value]) -> Self {
        self.params = params;
        self
    }

    pub fn with_completion_tag(mut self, completion_tag: &'a mut CompletionTag) -> Self {
        self.completion_tag = Some(completion_tag);
        self
    }
}

pub struct UtilityDispatcher {
    config: Arc<DispatcherConfig>,
    handlers: Arc<dyn CommandHandlers>,
    transactions: Arc<dyn LocalTransactionManager>,
    session: Arc<dyn SessionObjectLookup + Send + Sync>,
    resolver: NodeTargetResolver,
    propagator: RemotePropagator,
    transaction_coordinator: TransactionCoordinator,
    barrier: BarrierCoordinator,
    interceptor: Option<Arc<dyn UtilityInterceptor>>,
}

impl UtilityDispatcher {
    pub fn new(config: DispatcherConfig, collaborators: Collaborators) -> Self {
        let config = Arc::new(config);
        let topology = config.topology.clone();
        Self {
            resolver: NodeTargetResolver::new(collaborators.catalog, config.clone()),
            propagator: RemotePropagator::new(
                collaborators.transport,
                collaborators.pooler,
                topology.clone(),
            ),
            transaction_coordinator: TransactionCoordinator::new(
                collaborators.transactions.clone(),
                collaborators.participants,
                collaborators.gtm,
                collaborators.barrier_lock.clone(),
            ),
            barrier: BarrierCoordinator::new(
                collaborators.barrier,
                topology,
                collaborators.barrier_lock,
            ),
            handlers: collaborators.handlers,
            transactions: collaborators.transactions,
            session: collaborators.session,
            interceptor: None,
            config,
        }
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn UtilityInterceptor>) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn resolver(&self) -> &NodeTargetResolver {
        &self.resolver
    }

    /// Classify a statement against this dispatcher's session objects
    pub fn classify(&self, statement: &Statement) -> Classification {
        classify_with(statement, self.session.as_ref())
    }

    /// Dispatch with no parameters, discarding result rows
    pub fn dispatch(
        &self,
        statement: &Statement,
        query_text: &str,
        context: ExecutionContext,
        completion_tag: &mut CompletionTag,
    ) -> UtilityResult<()> {
        let mut dest = NoneSink;
        self.process_utility(
            UtilityCall::new(statement, query_text, context, &mut dest)
                .with_completion_tag(completion_tag),
        )
    }

    /// Dispatch through the interceptor when one is installed
    pub fn process_utility(&self, call: UtilityCall<'_>) -> UtilityResult<()> {
        match &self.interceptor {
            Some(interceptor) => interceptor.process_utility(self, call),
            None => self.standard_process_utility(call),
        }
    }

    pub fn standard_process_utility(&self, call: UtilityCall<'_>) -> UtilityResult<()> {
        let UtilityCall {
            statement,
            query_text,
            params,
            context,
            dest,
            mut completion_tag,
        } = call;

        if let Some(tag) = completion_tag.as_deref_mut() {
            tag.clear();
        }

        if context.depth > self.config.max_recursion_depth {
            return Err(UtilityError::RecursionLimitExceeded {
                depth: self.config.max_recursion_depth,
            });
        }

        let classification = self.classify(statement);
        if context.is_top_level
            && classification
                .log_level
                .is_logged_under(self.config.log_statement)
        {
            log::info!("statement: {}", query_text);
        }

        gate::check_read_only(statement, classification.tag, &context)?;
        self.resolver.check_supported(statement)?;
        gate::check_context(statement, &context, self.transactions.is_transaction_block())?;

        if classification.tag == UNKNOWN_TAG {
            log::error!("No command tag for {:?}", statement);
            return Err(UtilityError::UnknownStatementKind(format!(
                "{:?}",
                statement.kind()
            )));
        }

        // Targets are resolved while the named objects still exist under
        // their current names
        let plan = if context.propagates() {
            self.resolver.plan(statement)?
        } else {
            None
        };

        if let Some(plan) = plan.filter(|p| p.timing == PropagationTiming::BeforeLocal) {
            self.propagator.propagate(query_text, &plan)?;
        }

        self.execute_local(
            statement,
            query_text,
            params,
            &context,
            dest,
            completion_tag,
        )?;

        if let Some(plan) = plan.filter(|p| p.timing == PropagationTiming::AfterLocal) {
            self.propagator.propagate(query_text, &plan)?;
        }
        Ok(())
    }

    fn execute_local(
        &self,
        statement: &Statement,
        query_text: &str,
        params: &[Value],
        context: &ExecutionContext,
        dest: &mut dyn ResultSink,
        completion_tag: Option<&mut CompletionTag>,
    ) -> UtilityResult<()> {
        match statement {
            Statement::Transaction(transaction) => {
                self.transaction_coordinator
                    .execute(transaction, context, completion_tag)
            }

            Statement::Query(query) => {
                if query.cursor.is_none() {
                    log::error!("Non-cursor {:?} plan reached utility dispatch", query.command);
                    return Err(UtilityError::Internal(
                        "non-cursor plan reached utility dispatch".to_string(),
                    ));
                }
                self.run_handler(statement, query_text, params, dest)?;
                Ok(())
            }

            Statement::Fetch(fetch) => {
                let outcome = self.run_handler(statement, query_text, params, dest)?;
                let tag = if fetch.is_move { "MOVE" } else { "FETCH" };
                set_count_tag(completion_tag, tag, outcome);
                Ok(())
            }
            Statement::Copy(_) => {
                let outcome = self.run_handler(statement, query_text, params, dest)?;
                set_count_tag(completion_tag, "COPY", outcome);
                Ok(())
            }

            Statement::CreateSchema(schema) => {
                self.create_schema(statement, schema, query_text, context)
            }
            Statement::CreateTable(_)
            | Statement::CreateForeignTable(_)
            | Statement::AlterTable(_) => self.execute_expanded(statement, query_text, context),

            Statement::CreateIndex(index) => {
                self.handlers.check_relation_ownership(&index.relation)?;
                self.run_handler(statement, query_text, params, dest)?;
                Ok(())
            }

            Statement::Checkpoint => self.handlers.request_checkpoint(context.in_recovery),

            Statement::Reindex(reindex) => match reindex.kind {
                ObjectType::Index | ObjectType::Table | ObjectType::Database => {
                    self.run_handler(statement, query_text, params, dest)?;
                    Ok(())
                }
                other => {
                    log::error!("REINDEX of {:?} cannot be dispatched", other);
                    Err(UtilityError::UnknownStatementKind(format!(
                        "REINDEX {:?}",
                        other
                    )))
                }
            },

            Statement::VariableSet(set) => {
                self.run_handler(statement, query_text, params, dest)?;
                if context.propagates()
                    && (!set.is_local || !self.transactions.is_transaction_block())
                {
                    self.propagator
                        .forward_session_command(set.is_local, query_text, "SET")?;
                }
                Ok(())
            }
            Statement::Discard { .. } => {
                self.run_handler(statement, query_text, params, dest)?;
                if context.propagates() && !self.transactions.is_transaction_block() {
                    self.propagator
                        .forward_session_command(false, query_text, "DISCARD")?;
                }
                Ok(())
            }

            Statement::DropDatabase { name, .. } => {
                if context.propagates() {
                    self.clean_database_connections(name)?;
                }
                self.run_handler(statement, query_text, params, dest)?;
                Ok(())
            }
            Statement::CleanConnection(clean) => self.propagator.clean_connections(clean),

            Statement::Barrier { id } => {
                let id = self.barrier.request_barrier(id.as_deref(), context)?;
                if let Some(tag) = completion_tag {
                    tag.set(&format!("BARRIER {}", id));
                }
                Ok(())
            }

            _ => {
                self.run_handler(statement, query_text, params, dest)?;
                Ok(())
            }
        }
    }

    fn run_handler(
        &self,
        statement: &Statement,
        query_text: &str,
        params: &[Value],
        dest: &mut dyn ResultSink,
    ) -> UtilityResult<HandlerOutcome> {
        self.handlers.execute(statement, query_text, params, dest)
    }

    /// Create the schema, then dispatch its elements in order
    fn create_schema(
        &self,
        statement: &Statement,
        schema: &CreateSchemaStatement,
        query_text: &str,
        context: &ExecutionContext,
    ) -> UtilityResult<()> {
        let mut dest = NoneSink;
        self.run_handler(statement, query_text, &[], &mut dest)?;
        for element in &schema.elements {
            self.transactions.command_counter_increment();
            self.dispatch_substatement(element, query_text, context)?;
        }
        Ok(())
    }

    /// Run the expansion of CREATE TABLE / CREATE FOREIGN TABLE / ALTER TABLE.
    /// The primary object is handled directly; everything else re-enters the
    /// dispatcher as a sub-statement.
    fn execute_expanded(
        &self,
        statement: &Statement,
        query_text: &str,
        context: &ExecutionContext,
    ) -> UtilityResult<()> {
        let sub_statements = self.handlers.expand(statement, query_text)?;
        log::debug!(
            "{:?} expanded into {} sub-statement(s)",
            statement.kind(),
            sub_statements.len()
        );

        let is_alter = matches!(statement, Statement::AlterTable(_));
        let last = sub_statements.len().saturating_sub(1);
        for (index, sub_statement) in sub_statements.iter().enumerate() {
            match sub_statement {
                Statement::CreateTable(create) if statement.is_primal_create() => {
                    let relation = self.handlers.define_relation(create, RelationKind::Table)?;
                    self.transactions.command_counter_increment();
                    self.handlers.create_secondary_storage(relation, create)?;
                }
                Statement::CreateForeignTable(foreign) if statement.is_primal_create() => {
                    let relation = self
                        .handlers
                        .define_relation(&foreign.table, RelationKind::ForeignTable)?;
                    self.handlers.create_foreign_table(relation, foreign)?;
                }
                Statement::AlterTable(alter) if is_alter => {
                    self.handlers.alter_table(alter)?;
                }
                other => self.dispatch_substatement(other, query_text, context)?,
            }

            if index < last {
                self.transactions.command_counter_increment();
            }
        }
        Ok(())
    }

    fn dispatch_substatement(
        &self,
        statement: &Statement,
        query_text: &str,
        context: &ExecutionContext,
    ) -> UtilityResult<()> {
        let mut dest = NoneSink;
        self.process_utility(UtilityCall::new(
            statement,
            query_text,
            context.for_substatement(),
            &mut dest,
        ))
    }

    /// Drop pooled connections to a database here and on the other
    /// coordinators before it is dropped
    fn clean_database_connections(&self, database: &str) -> UtilityResult<()> {
        self.propagator
            .clean_connections(&CleanConnectionStatement::for_database(database))?;

        let text = format!(
            "CLEAN CONNECTION TO ALL FOR DATABASE {};",
            quote_identifier(database)
        );
        let plan = PropagationPlan {
            group: NodeGroup::Coordinators,
            force_autocommit: true,
            timing: PropagationTiming::BeforeLocal,
        };
        self.propagator.propagate(&text, &plan)
    }
}

fn set_count_tag(completion_tag: Option<&mut CompletionTag>, tag: &str, outcome: HandlerOutcome) {
    if let (Some(completion_tag), Some(count)) = (completion_tag, outcome.rows_processed) {
        completion_tag.set_count(tag, count);
    }
}

/// Quote an identifier unless it is a plain lower-case name
fn quote_identifier(name: &str) -> String {
    let plain = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}
