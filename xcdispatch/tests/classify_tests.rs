// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command tags, logging classes and result-shape predicates

#[path = "testutils/mod.rs"]
mod testutils;

use std::collections::BTreeSet;
use testutils::statements::*;
use testutils::test_fixture::TestFixture;
use xcdispatch::ast::*;
use xcdispatch::classify::{
    command_is_read_only, utility_returns_tuples, NoSessionObjects, UNKNOWN_TAG,
};
use xcdispatch::exec::COMPLETION_TAG_BUFSIZE;
use xcdispatch::{classify, LogStmtLevel};

#[test]
fn test_every_kind_has_its_tag() {
    for (expected, statement) in sample_statements() {
        let classification = classify(&statement);
        assert_eq!(
            classification.tag, expected,
            "wrong tag for {:?}",
            statement
        );
        assert_ne!(classification.tag, UNKNOWN_TAG);
        assert!(classification.tag.len() < COMPLETION_TAG_BUFSIZE);
    }
}

#[test]
fn test_samples_cover_every_kind() {
    let kinds: BTreeSet<StatementKind> = sample_statements()
        .iter()
        .map(|(_, statement)| statement.kind())
        .collect();
    assert_eq!(kinds.len(), 92);
}

#[test]
fn test_classified_levels_are_never_none() {
    for (_, statement) in sample_statements() {
        assert_ne!(classify(&statement).log_level, LogStmtLevel::None);
    }
}

#[test]
fn test_log_levels() {
    assert_eq!(classify(&create_table("x")).log_level, LogStmtLevel::Ddl);
    assert_eq!(classify(&copy_from("t")).log_level, LogStmtLevel::Mod);
    assert_eq!(classify(&vacuum(None)).log_level, LogStmtLevel::All);
    assert_eq!(classify(&begin()).log_level, LogStmtLevel::All);

    let copy_to = Statement::Copy(CopyStatement {
        relation: Some(name("t")),
        is_from: false,
        filename: None,
    });
    assert_eq!(classify(&copy_to).log_level, LogStmtLevel::All);

    let truncate = Statement::Truncate(TruncateStatement {
        relations: vec![name("t")],
        restart_identity: true,
        cascade: false,
    });
    assert_eq!(classify(&truncate).log_level, LogStmtLevel::Mod);
}

#[test]
fn test_explain_analyze_takes_inner_level() {
    let delete = Statement::Query(QueryStatement {
        command: QueryCommand::Delete,
        ..QueryStatement::select()
    });
    let explain = |analyze| {
        Statement::Explain(ExplainStatement {
            analyze,
            verbose: false,
            query: Box::new(delete.clone()),
        })
    };
    assert_eq!(classify(&explain(true)).log_level, LogStmtLevel::Mod);
    assert_eq!(classify(&explain(false)).log_level, LogStmtLevel::All);
}

#[test]
fn test_execute_level_looks_through_prepared_statement() {
    let fixture = TestFixture::permissive();
    let execute = Statement::Execute(ExecuteStatement {
        name: "ins".to_string(),
        into: None,
        params: Vec::new(),
    });

    // Not prepared yet
    assert_eq!(
        fixture.dispatcher.classify(&execute).log_level,
        LogStmtLevel::All
    );

    let prepare = Statement::Prepare(PrepareStatement {
        name: "ins".to_string(),
        query: Box::new(Statement::Query(QueryStatement {
            command: QueryCommand::Insert,
            ..QueryStatement::select()
        })),
    });
    assert_eq!(classify(&prepare).log_level, LogStmtLevel::Mod);
    fixture
        .dispatch(&prepare, "PREPARE ins AS INSERT INTO t VALUES (1)")
        .unwrap();

    assert_eq!(
        fixture.dispatcher.classify(&execute).log_level,
        LogStmtLevel::Mod
    );
    assert_eq!(fixture.dispatcher.classify(&execute).tag, "EXECUTE");
}

#[test]
fn test_query_tags() {
    let select = QueryStatement::select();
    assert_eq!(classify(&Statement::Query(select.clone())).tag, "SELECT");

    let for_update = QueryStatement {
        row_marks: vec![RowMarkKind::Exclusive],
        ..select.clone()
    };
    assert_eq!(
        classify(&Statement::Query(for_update)).tag,
        "SELECT FOR UPDATE"
    );

    let update = QueryStatement {
        command: QueryCommand::Update,
        ..select
    };
    assert_eq!(classify(&Statement::Query(update)).tag, "UPDATE");
}

#[test]
fn test_sub_kind_without_command_is_unknown() {
    let remove = Statement::RemoveFunction(RemoveFunctionStatement {
        kind: ObjectType::Table,
        name: name("f"),
        missing_ok: false,
    });
    assert_eq!(classify(&remove).tag, UNKNOWN_TAG);

    let define = Statement::Define(DefineStatement {
        kind: ObjectType::Index,
        name: name("x"),
    });
    assert_eq!(classify(&define).tag, UNKNOWN_TAG);
}

#[test]
fn test_returns_tuples() {
    let fixture = TestFixture::new();
    let show = Statement::VariableShow {
        name: "work_mem".to_string(),
    };
    assert!(utility_returns_tuples(&show, &NoSessionObjects));
    assert!(!utility_returns_tuples(&create_table("x"), &NoSessionObjects));

    // Unknown portal
    assert!(!utility_returns_tuples(
        &fetch("c1", None),
        fixture.cluster.as_ref()
    ));

    fixture
        .dispatch(&declare_cursor("c1"), "DECLARE c1 CURSOR FOR SELECT 1")
        .unwrap();
    assert!(utility_returns_tuples(
        &fetch("c1", None),
        fixture.cluster.as_ref()
    ));

    let move_cmd = Statement::Fetch(FetchStatement {
        portal: "c1".to_string(),
        is_move: true,
        count: Some(1),
    });
    assert!(!utility_returns_tuples(&move_cmd, fixture.cluster.as_ref()));
}

#[test]
fn test_utility_statements_are_never_strictly_read_only() {
    for (_, statement) in sample_statements() {
        if statement.kind() == StatementKind::Query {
            continue;
        }
        assert!(!command_is_read_only(&statement));
    }
    assert!(command_is_read_only(&Statement::Query(
        QueryStatement::select()
    )));
}
