// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for xcdispatch

use std::path::PathBuf;
use std::sync::Arc;

use super::commands::OutputFormat;
use super::output::{ClassifiedStatement, ResultFormatter, SimulatedStatement};
use super::script::Script;
use xcdispatch::exec::VecSink;
use xcdispatch::{
    CompletionTag, DispatcherConfig, ExecutionContext, MemoryCluster, NodeRole, UtilityCall,
    UtilityDispatcher,
};

/// Execution context flags for `simulate`
#[derive(Debug, Clone, Copy)]
pub struct SimulateOptions {
    pub role: NodeRole,
    pub from_coordinator: bool,
    pub read_only: bool,
    pub recovery: bool,
    pub security_restricted: bool,
    pub superuser: bool,
}

impl SimulateOptions {
    fn context(&self) -> ExecutionContext {
        let context = if self.from_coordinator {
            ExecutionContext::from_coordinator(self.role)
        } else {
            ExecutionContext::top_level(self.role)
        };
        context
            .with_read_only(self.read_only)
            .with_recovery(self.recovery)
            .with_security_restriction(self.security_restricted)
            .with_superuser(self.superuser)
    }
}

fn load_config(path: Option<PathBuf>) -> Result<DispatcherConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(DispatcherConfig::from_file(path)?),
        None => Ok(DispatcherConfig::default()),
    }
}

/// In-memory cluster seeded with the script's relations, and a dispatcher on it
fn build_dispatcher(
    config: DispatcherConfig,
    script: &Script,
) -> (Arc<MemoryCluster>, UtilityDispatcher) {
    let cluster = Arc::new(MemoryCluster::new(config.topology.clone()));
    for (name, kind) in &script.relations {
        cluster.set_relation(name, *kind);
    }
    let dispatcher = UtilityDispatcher::new(config, MemoryCluster::collaborators(&cluster));
    (cluster, dispatcher)
}

/// Handle the classify command
pub fn handle_classify(
    script_path: PathBuf,
    config_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let script = Script::load(&script_path)?;
    let (_cluster, dispatcher) = build_dispatcher(config, &script);

    let rows: Vec<ClassifiedStatement> = script
        .statements
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let classification = dispatcher.classify(&entry.statement);
            let targets = match dispatcher.resolver().resolve_targets(&entry.statement) {
                Ok(group) => group.to_string(),
                Err(e) => format!("error: {}", e),
            };
            ClassifiedStatement {
                index: index + 1,
                text: entry.text.clone(),
                kind: format!("{:?}", entry.statement.kind()),
                tag: classification.tag.to_string(),
                log_level: classification.log_level.to_string(),
                targets,
            }
        })
        .collect();

    print!("{}", ResultFormatter::format_classified(&rows, format));
    Ok(())
}

/// Handle the simulate command
///
/// Every statement is dispatched even when an earlier one failed, the way a
/// client script without ON_ERROR_STOP would run.
pub fn handle_simulate(
    script_path: PathBuf,
    config_path: Option<PathBuf>,
    options: SimulateOptions,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let script = Script::load(&script_path)?;
    let (cluster, dispatcher) = build_dispatcher(config, &script);

    let mut results = Vec::with_capacity(script.statements.len());
    for (index, entry) in script.statements.iter().enumerate() {
        let before = cluster.events().len();
        let mut tag = CompletionTag::new();
        let mut sink = VecSink::default();

        let outcome = dispatcher.process_utility(
            UtilityCall::new(&entry.statement, &entry.text, options.context(), &mut sink)
                .with_completion_tag(&mut tag),
        );
        if let Err(e) = &outcome {
            log::info!("Statement {} failed: {}", index + 1, e);
        }

        let events = cluster
            .events()
            .into_iter()
            .skip(before)
            .map(|event| event.to_string())
            .collect();
        results.push(SimulatedStatement {
            index: index + 1,
            text: entry.text.clone(),
            tag: outcome.as_ref().ok().map(|_| tag.as_str().to_string()),
            error: outcome
                .err()
                .map(|e| (e.sqlstate().to_string(), e.to_string())),
            rows: sink.rows,
            events,
        });
    }

    print!("{}", ResultFormatter::format_simulated(&results, format));
    Ok(())
}
