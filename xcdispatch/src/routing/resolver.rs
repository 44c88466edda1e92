// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Node targeting
//!
//! Decides which node group must also execute a statement. DDL defaults to
//! every node because catalog metadata is replicated; views and sequences live
//! on coordinators only, and heap maintenance is meaningful on datanodes only.

use super::catalog::{CatalogLookup, RelationKind};
use super::node::NodeGroup;
use crate::ast::{
    GrantObjectType, GrantStatement, GrantTarget, ObjectType, QualifiedName, Statement,
    TransactionStatement,
};
use crate::config::{DispatcherConfig, UnsupportedFeature};
use crate::exec::error::{UtilityError, UtilityResult};
use std::sync::Arc;

/// When the fan-out happens relative to local execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationTiming {
    BeforeLocal,
    AfterLocal,
}

/// Resolved propagation for one statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropagationPlan {
    pub group: NodeGroup,
    pub force_autocommit: bool,
    pub timing: PropagationTiming,
}

impl PropagationPlan {
    fn after(group: NodeGroup) -> Self {
        Self {
            group,
            force_autocommit: false,
            timing: PropagationTiming::AfterLocal,
        }
    }

    fn autocommit(mut self, force_autocommit: bool) -> Self {
        self.force_autocommit = force_autocommit;
        self
    }

    fn before_local(mut self) -> Self {
        self.timing = PropagationTiming::BeforeLocal;
        self
    }
}

pub struct NodeTargetResolver {
    catalog: Arc<dyn CatalogLookup>,
    config: Arc<DispatcherConfig>,
}

impl NodeTargetResolver {
    pub fn new(catalog: Arc<dyn CatalogLookup>, config: Arc<DispatcherConfig>) -> Self {
        Self { catalog, config }
    }

    /// Node group that must also execute the statement
    pub fn resolve_targets(&self, statement: &Statement) -> UtilityResult<NodeGroup> {
        Ok(self
            .plan(statement)?
            .map(|plan| plan.group)
            .unwrap_or(NodeGroup::None))
    }

    /// Full propagation plan, `None` when the statement stays local
    pub fn plan(&self, statement: &Statement) -> UtilityResult<Option<PropagationPlan>> {
        let plan = match statement {
            // Local only: transaction control has its own paths, session
            // state goes through the pooler, plannable work through the planner
            Statement::Transaction(_)
            | Statement::Query(_)
            | Statement::ClosePortal { .. }
            | Statement::Fetch(_)
            | Statement::Copy(_)
            | Statement::Prepare(_)
            | Statement::Execute(_)
            | Statement::Deallocate { .. }
            | Statement::Do { .. }
            | Statement::Notify { .. }
            | Statement::Listen { .. }
            | Statement::Unlisten { .. }
            | Statement::Explain(_)
            | Statement::VariableSet(_)
            | Statement::VariableShow { .. }
            | Statement::Discard { .. }
            | Statement::ConstraintsSet { .. }
            | Statement::Barrier { .. } => return Ok(None),

            Statement::CreateView(_)
            | Statement::CreateSequence { .. }
            | Statement::AlterSequence { .. } => PropagationPlan::after(NodeGroup::Coordinators),

            Statement::AlterTable(alter) => {
                PropagationPlan::after(self.relation_group(alter.relkind, &alter.relation)?)
            }
            Statement::Drop(drop) => PropagationPlan::after(static_group(drop.object_type)),
            Statement::Truncate(truncate) => {
                PropagationPlan::after(self.uniform_group("TRUNCATE", &truncate.relations)?)
            }
            Statement::Comment(comment) => {
                PropagationPlan::after(self.relation_group(comment.object_type, &comment.object)?)
            }
            Statement::Rename(rename) => {
                PropagationPlan::after(self.relation_group(rename.object_type, &rename.object)?)
            }
            Statement::AlterObjectSchema(alter) => {
                PropagationPlan::after(self.relation_group(alter.object_type, &alter.object)?)
            }
            Statement::AlterOwner(alter) => {
                PropagationPlan::after(self.relation_group(alter.object_type, &alter.object)?)
            }
            Statement::Grant(grant) => PropagationPlan::after(self.grant_group(grant)?),
            Statement::CreateRule(rule) => {
                PropagationPlan::after(self.relation_group(ObjectType::Table, &rule.relation)?)
            }
            Statement::DropProperty(drop) => match drop.kind {
                ObjectType::Rule => PropagationPlan::after(
                    self.relation_group(ObjectType::Table, &drop.relation)?,
                ),
                _ => PropagationPlan::after(NodeGroup::All),
            },

            Statement::CreateIndex(index) => {
                // Built as part of its constraint's table statement
                if index.is_constraint {
                    return Ok(None);
                }
                PropagationPlan::after(NodeGroup::All).autocommit(index.concurrent)
            }

            Statement::CreateDatabase { .. } | Statement::DropDatabase { .. } => {
                PropagationPlan::after(NodeGroup::All).autocommit(true)
            }
            Statement::Reindex(reindex) => PropagationPlan::after(NodeGroup::All)
                .autocommit(reindex.kind == ObjectType::Database),

            // Coordinators hold no heap data
            Statement::Load { .. } => PropagationPlan::after(NodeGroup::Datanodes),
            Statement::Cluster { .. } | Statement::Checkpoint => {
                PropagationPlan::after(NodeGroup::Datanodes).autocommit(true)
            }
            Statement::Vacuum(_) => PropagationPlan::after(NodeGroup::Datanodes)
                .autocommit(true)
                .before_local(),

            Statement::CleanConnection(_) => {
                PropagationPlan::after(NodeGroup::Coordinators).autocommit(true)
            }

            Statement::CreateSchema(_)
            | Statement::CreateTable(_)
            | Statement::CreateForeignTable(_)
            | Statement::SecurityLabel { .. }
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
            | Statement::CreateFunction { .. }
            | Statement::RemoveFunction(_)
            | Statement::GrantRole(_)
            | Statement::AlterDefaultPrivileges { .. }
            | Statement::AlterDatabase { .. }
            | Statement::AlterDatabaseSet { .. }
            | Statement::CreateTrigger { .. }
            | Statement::CreateLanguage { .. }
            | Statement::DropLanguage { .. }
            | Statement::CreateRole { .. }
            | Statement::AlterRole { .. }
            | Statement::AlterRoleSet { .. }
            | Statement::DropRole { .. }
            | Statement::DropOwned { .. }
            | Statement::ReassignOwned { .. }
            | Statement::Lock(_)
            | Statement::CreateConversion { .. }
            | Statement::CreateCast { .. }
            | Statement::DropCast { .. }
            | Statement::CreateOperatorClass { .. }
            | Statement::CreateOperatorFamily { .. }
            | Statement::AlterOperatorFamily { .. }
            | Statement::DropOperatorClass { .. }
            | Statement::DropOperatorFamily { .. }
            | Statement::AlterTsDictionary { .. }
            | Statement::AlterTsConfiguration { .. } => PropagationPlan::after(NodeGroup::All),
        };

        log::debug!(
            "Resolved {:?} to {} (autocommit: {}, timing: {:?})",
            statement.kind(),
            plan.group,
            plan.force_autocommit,
            plan.timing
        );
        Ok(Some(plan))
    }

    /// Fail fast on statement families the cluster cannot execute consistently
    pub fn check_supported(&self, statement: &Statement) -> UtilityResult<()> {
        let gated = match statement {
            Statement::Transaction(TransactionStatement::Savepoint { .. }) => {
                Some((UnsupportedFeature::Savepoints, "SAVEPOINT"))
            }
            Statement::Prepare(_) => Some((UnsupportedFeature::PreparedStatements, "PREPARE")),
            Statement::Execute(_) => Some((UnsupportedFeature::PreparedStatements, "EXECUTE")),
            Statement::CreateIndex(index) if index.concurrent => Some((
                UnsupportedFeature::ConcurrentIndex,
                "CREATE INDEX CONCURRENTLY",
            )),
            Statement::CreateTrigger { .. } => Some((UnsupportedFeature::Triggers, "TRIGGER")),
            Statement::DropProperty(drop) if drop.kind == ObjectType::Trigger => {
                Some((UnsupportedFeature::Triggers, "TRIGGER"))
            }
            Statement::CreateTablespace { .. }
            | Statement::DropTablespace { .. }
            | Statement::AlterTablespaceOptions { .. } => {
                Some((UnsupportedFeature::Tablespaces, "TABLESPACE"))
            }
            // Rules cannot be commented on consistently in any configuration
            Statement::Comment(comment) if comment.object_type == ObjectType::Rule => {
                return Err(UtilityError::UnsupportedInCluster {
                    feature: "COMMENT on RULE".to_string(),
                });
            }
            _ => None,
        };

        match gated {
            Some((feature, name)) if self.config.is_unsupported(feature) => {
                Err(UtilityError::UnsupportedInCluster {
                    feature: name.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Target for a statement naming one object; tables are looked up since
    /// the name may in truth denote a view or sequence
    fn relation_group(
        &self,
        object_type: ObjectType,
        name: &QualifiedName,
    ) -> UtilityResult<NodeGroup> {
        match object_type {
            ObjectType::Table => Ok(self.lookup_group(name)?),
            other => Ok(static_group(other)),
        }
    }

    fn lookup_group(&self, name: &QualifiedName) -> UtilityResult<NodeGroup> {
        let kind = self.catalog.resolve_relation_kind(name)?;
        Ok(relation_kind_group(kind))
    }

    /// Every named relation must land on the same group
    fn uniform_group(&self, command: &str, names: &[QualifiedName]) -> UtilityResult<NodeGroup> {
        let mut resolved: Option<NodeGroup> = None;
        for name in names {
            let group = self.lookup_group(name)?;
            match resolved {
                None => resolved = Some(group),
                Some(previous) if previous != group => {
                    return Err(UtilityError::AmbiguousMultiObjectTarget {
                        command: command.to_string(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(resolved.unwrap_or(NodeGroup::All))
    }

    fn grant_group(&self, grant: &GrantStatement) -> UtilityResult<NodeGroup> {
        match (grant.object_type, grant.target) {
            (GrantObjectType::Sequence, _) => Ok(NodeGroup::Coordinators),
            (GrantObjectType::Relation, GrantTarget::Object) => {
                let command = if grant.is_grant { "GRANT" } else { "REVOKE" };
                self.uniform_group(command, &grant.objects)
            }
            _ => Ok(NodeGroup::All),
        }
    }
}

fn static_group(object_type: ObjectType) -> NodeGroup {
    match object_type {
        ObjectType::Sequence | ObjectType::View => NodeGroup::Coordinators,
        _ => NodeGroup::All,
    }
}

fn relation_kind_group(kind: RelationKind) -> NodeGroup {
    if kind.is_coordinator_only() {
        NodeGroup::Coordinators
    } else {
        NodeGroup::All
    }
}
