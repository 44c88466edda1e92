// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Prepared transactions outlive a coordinator restart; session state does not

#[path = "testutils/mod.rs"]
mod testutils;

use testutils::statements::*;
use testutils::test_fixture::TestFixture;
use xcdispatch::ast::{ExecuteStatement, PrepareStatement, QueryStatement, Statement};
use xcdispatch::classify::utility_returns_tuples;
use xcdispatch::cluster::ClusterEvent;
use xcdispatch::txn::{GlobalTransactionManager, LocalTransactionManager, TransactionStatus};
use xcdispatch::{NodeId, UtilityError};

fn node(name: &str) -> NodeId {
    NodeId::from(name)
}

#[test]
fn test_commit_prepared_after_restart() {
    let fixture = TestFixture::new();
    fixture.dispatch(&begin(), "BEGIN").unwrap();
    fixture
        .dispatch(&create_table("orders"), "CREATE TABLE orders (id int)")
        .unwrap();
    fixture
        .dispatch(&prepare_transaction("g1"), "PREPARE TRANSACTION 'g1'")
        .unwrap();

    let restarted = fixture.restarted();
    restarted.clear_events();
    restarted
        .dispatch(&commit_prepared("g1"), "COMMIT PREPARED 'g1'")
        .unwrap();

    let events = restarted.events();
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, ClusterEvent::ParticipantFinish { commit: true, .. }))
            .count(),
        3
    );
    assert_eq!(
        events.last(),
        Some(&ClusterEvent::LocalFinishPrepared {
            gid: "g1".to_string(),
            commit: true
        })
    );
    assert_eq!(
        restarted.cluster.status("g1"),
        Some(TransactionStatus::Committed)
    );
    assert!(!restarted.cluster.is_locally_prepared("g1"));
}

#[test]
fn test_in_doubt_participant_resolved_after_restart() {
    let fixture = TestFixture::new();
    fixture.dispatch(&begin(), "BEGIN").unwrap();
    fixture
        .dispatch(&create_table("orders"), "CREATE TABLE orders (id int)")
        .unwrap();
    fixture.cluster.fail_prepare_on(&node("dn2"));
    fixture.cluster.fail_rollback_prepared_on(&node("dn1"));
    assert!(fixture
        .dispatch(&prepare_transaction("g2"), "PREPARE TRANSACTION 'g2'")
        .is_err());

    let restarted = fixture.restarted();
    restarted.cluster.clear_faults();
    restarted
        .dispatch(&rollback_prepared("g2"), "ROLLBACK PREPARED 'g2'")
        .unwrap();
    assert!(restarted.cluster.remote_prepared("g2").is_empty());
    assert_eq!(
        restarted.cluster.status("g2"),
        Some(TransactionStatus::Aborted)
    );
}

#[test]
fn test_restart_discards_session_state() {
    let fixture = TestFixture::permissive();
    let prepare = Statement::Prepare(PrepareStatement {
        name: "q".to_string(),
        query: Box::new(Statement::Query(QueryStatement::select())),
    });
    let execute = Statement::Execute(ExecuteStatement {
        name: "q".to_string(),
        into: None,
        params: Vec::new(),
    });
    fixture.dispatch(&prepare, "PREPARE q AS SELECT 1").unwrap();
    fixture.dispatch(&begin(), "BEGIN").unwrap();
    assert!(fixture.cluster.is_transaction_block());
    assert!(utility_returns_tuples(&execute, fixture.cluster.as_ref()));

    let restarted = fixture.restarted();
    assert!(!restarted.cluster.is_transaction_block());
    assert_eq!(restarted.cluster.state().status, TransactionStatus::Idle);

    // The prepared statement went with the session
    assert!(!utility_returns_tuples(&execute, restarted.cluster.as_ref()));
}

#[test]
fn test_unknown_gid_after_restart() {
    let fixture = TestFixture::new();
    let restarted = fixture.restarted();
    let err = restarted
        .dispatch(&commit_prepared("g9"), "COMMIT PREPARED 'g9'")
        .unwrap_err();
    assert_eq!(
        err,
        UtilityError::UnknownGlobalTransaction {
            gid: "g9".to_string()
        }
    );
}
