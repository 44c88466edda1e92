// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Test fixture for xcdispatch integration tests
//!
//! Each fixture owns its own in-memory cluster, so tests never share state.

use std::sync::Arc;
use xcdispatch::cluster::ClusterEvent;
use xcdispatch::routing::RelationKind;
use xcdispatch::{
    CompletionTag, DispatcherConfig, ExecutionContext, MemoryCluster, NodeRole, Statement,
    UtilityDispatcher, UtilityResult,
};

pub struct TestFixture {
    pub cluster: Arc<MemoryCluster>,
    pub dispatcher: UtilityDispatcher,
}

impl TestFixture {
    /// Fixture with the default configuration
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    /// Fixture with every cluster feature enabled
    pub fn permissive() -> Self {
        Self::with_config(DispatcherConfig::permissive())
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let cluster = Arc::new(MemoryCluster::new(config.topology.clone()));
        cluster.set_relation("t", RelationKind::Table);
        cluster.set_relation("t2", RelationKind::Table);
        cluster.set_relation("seq", RelationKind::Sequence);
        cluster.set_relation("v", RelationKind::View);
        cluster.set_relation("ft", RelationKind::ForeignTable);

        let dispatcher = UtilityDispatcher::new(config, MemoryCluster::collaborators(&cluster));
        Self {
            cluster,
            dispatcher,
        }
    }

    /// A new dispatcher on the same cluster, as after a coordinator restart
    pub fn restarted(&self) -> Self {
        self.cluster.restart_coordinator();
        let dispatcher = UtilityDispatcher::new(
            self.dispatcher.config().clone(),
            MemoryCluster::collaborators(&self.cluster),
        );
        Self {
            cluster: self.cluster.clone(),
            dispatcher,
        }
    }

    /// Context of a superuser client connected to this coordinator
    pub fn client_context() -> ExecutionContext {
        ExecutionContext::top_level(NodeRole::Coordinator).with_superuser(true)
    }

    /// Dispatch as a client of this coordinator and return the completion tag
    pub fn dispatch(&self, statement: &Statement, text: &str) -> UtilityResult<String> {
        self.dispatch_with(statement, text, Self::client_context())
    }

    pub fn dispatch_with(
        &self,
        statement: &Statement,
        text: &str,
        context: ExecutionContext,
    ) -> UtilityResult<String> {
        let mut tag = CompletionTag::new();
        self.dispatcher.dispatch(statement, text, context, &mut tag)?;
        Ok(tag.as_str().to_string())
    }

    pub fn events(&self) -> Vec<ClusterEvent> {
        self.cluster.events()
    }

    pub fn clear_events(&self) {
        self.cluster.journal().clear();
    }
}
