// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Ordered record of collaborator calls made by the in-memory cluster

use crate::ast::StatementKind;
use crate::routing::{NodeId, RelationKind, RemoteExecutionRequest};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum ClusterEvent {
    /// Local command handler ran
    Handler(StatementKind),
    DefineRelation {
        relation: String,
        kind: RelationKind,
    },
    SecondaryStorage {
        relation: String,
    },
    ForeignTable {
        relation: String,
    },
    AlterTable {
        relation: String,
    },
    OwnershipCheck {
        relation: String,
    },
    Checkpoint {
        restartpoint: bool,
    },
    CommandCounterIncrement,

    Remote(RemoteExecutionRequest),
    PoolerSet {
        is_local: bool,
        text: String,
    },
    PoolerClean {
        database: Option<String>,
    },

    LocalBegin,
    LocalCommit,
    LocalAbort,
    LocalPrepare {
        gid: String,
    },
    LocalFinishPrepared {
        gid: String,
        commit: bool,
    },
    Savepoint {
        name: String,
    },

    RemoteBegin {
        begin_query: Option<String>,
    },
    ParticipantPrepare {
        node: NodeId,
        gid: String,
    },
    ParticipantFinish {
        node: NodeId,
        gid: String,
        commit: bool,
    },
    ParticipantAbort,

    BarrierPrepare {
        node: NodeId,
        id: String,
    },
    BarrierExecute {
        node: NodeId,
        id: String,
    },
    BarrierEnd {
        node: NodeId,
        id: String,
    },
    BarrierRecord {
        id: String,
    },
}

impl std::fmt::Display for ClusterEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClusterEvent::Handler(kind) => write!(f, "handler {:?}", kind),
            ClusterEvent::DefineRelation { relation, kind } => {
                write!(f, "define {:?} {}", kind, relation)
            }
            ClusterEvent::SecondaryStorage { relation } => {
                write!(f, "secondary storage for {}", relation)
            }
            ClusterEvent::ForeignTable { relation } => write!(f, "foreign table {}", relation),
            ClusterEvent::AlterTable { relation } => write!(f, "alter table {}", relation),
            ClusterEvent::OwnershipCheck { relation } => {
                write!(f, "ownership check on {}", relation)
            }
            ClusterEvent::Checkpoint { restartpoint } => {
                if *restartpoint {
                    write!(f, "restartpoint")
                } else {
                    write!(f, "checkpoint")
                }
            }
            ClusterEvent::CommandCounterIncrement => write!(f, "command counter increment"),
            ClusterEvent::Remote(request) => write!(
                f,
                "remote {}{}: {}",
                request.node_group,
                if request.force_autocommit {
                    " (autocommit)"
                } else {
                    ""
                },
                request.statement_text
            ),
            ClusterEvent::PoolerSet { is_local, text } => {
                write!(f, "pooler set (local: {}): {}", is_local, text)
            }
            ClusterEvent::PoolerClean { database } => match database {
                Some(database) => write!(f, "pooler clean for database {}", database),
                None => write!(f, "pooler clean"),
            },
            ClusterEvent::LocalBegin => write!(f, "local begin"),
            ClusterEvent::LocalCommit => write!(f, "local commit"),
            ClusterEvent::LocalAbort => write!(f, "local abort"),
            ClusterEvent::LocalPrepare { gid } => write!(f, "local prepare '{}'", gid),
            ClusterEvent::LocalFinishPrepared { gid, commit } => {
                write!(f, "local {} prepared '{}'", finish_word(*commit), gid)
            }
            ClusterEvent::Savepoint { name } => write!(f, "savepoint {}", name),
            ClusterEvent::RemoteBegin { begin_query } => match begin_query {
                Some(query) => write!(f, "remote begin: {}", query),
                None => write!(f, "remote begin"),
            },
            ClusterEvent::ParticipantPrepare { node, gid } => {
                write!(f, "prepare '{}' on {}", gid, node)
            }
            ClusterEvent::ParticipantFinish { node, gid, commit } => {
                write!(f, "{} prepared '{}' on {}", finish_word(*commit), gid, node)
            }
            ClusterEvent::ParticipantAbort => write!(f, "abort participants"),
            ClusterEvent::BarrierPrepare { node, id } => {
                write!(f, "prepare barrier '{}' on {}", id, node)
            }
            ClusterEvent::BarrierExecute { node, id } => {
                write!(f, "execute barrier '{}' on {}", id, node)
            }
            ClusterEvent::BarrierEnd { node, id } => write!(f, "end barrier '{}' on {}", id, node),
            ClusterEvent::BarrierRecord { id } => write!(f, "local barrier record '{}'", id),
        }
    }
}

fn finish_word(commit: bool) -> &'static str {
    if commit {
        "commit"
    } else {
        "rollback"
    }
}

#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub at: DateTime<Utc>,
    pub event: ClusterEvent,
}

#[derive(Debug, Default)]
pub struct Journal {
    entries: Mutex<Vec<JournalEntry>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: ClusterEvent) {
        log::trace!("journal: {}", event);
        self.entries.lock().push(JournalEntry {
            at: Utc::now(),
            event,
        });
    }

    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.lock().clone()
    }

    pub fn events(&self) -> Vec<ClusterEvent> {
        self.entries
            .lock()
            .iter()
            .map(|entry| entry.event.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::NodeGroup;

    #[test]
    fn test_journal_keeps_order() {
        let journal = Journal::new();
        journal.record(ClusterEvent::LocalBegin);
        journal.record(ClusterEvent::CommandCounterIncrement);
        journal.record(ClusterEvent::LocalCommit);
        assert_eq!(
            journal.events(),
            vec![
                ClusterEvent::LocalBegin,
                ClusterEvent::CommandCounterIncrement,
                ClusterEvent::LocalCommit
            ]
        );
        journal.clear();
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn test_event_display() {
        let event = ClusterEvent::Remote(
            RemoteExecutionRequest::new("DROP DATABASE d", NodeGroup::All).with_autocommit(true),
        );
        assert_eq!(event.to_string(), "remote ALL (autocommit): DROP DATABASE d");
        assert_eq!(
            ClusterEvent::Checkpoint { restartpoint: true }.to_string(),
            "restartpoint"
        );
    }
}
