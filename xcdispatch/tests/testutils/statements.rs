// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement builders shared by the integration tests

use xcdispatch::ast::*;

pub fn name(name: &str) -> QualifiedName {
    QualifiedName::from(name)
}

pub fn begin() -> Statement {
    Statement::Transaction(TransactionStatement::Begin {
        options: Vec::new(),
    })
}

pub fn begin_with(options: Vec<TransactionOption>) -> Statement {
    Statement::Transaction(TransactionStatement::Begin { options })
}

pub fn commit() -> Statement {
    Statement::Transaction(TransactionStatement::Commit)
}

pub fn rollback() -> Statement {
    Statement::Transaction(TransactionStatement::Rollback)
}

pub fn savepoint(name: &str) -> Statement {
    Statement::Transaction(TransactionStatement::Savepoint {
        name: name.to_string(),
    })
}

pub fn prepare_transaction(gid: &str) -> Statement {
    Statement::Transaction(TransactionStatement::Prepare {
        gid: gid.to_string(),
    })
}

pub fn commit_prepared(gid: &str) -> Statement {
    Statement::Transaction(TransactionStatement::CommitPrepared {
        gid: gid.to_string(),
    })
}

pub fn rollback_prepared(gid: &str) -> Statement {
    Statement::Transaction(TransactionStatement::RollbackPrepared {
        gid: gid.to_string(),
    })
}

pub fn create_table(relation: &str) -> Statement {
    Statement::CreateTable(create_table_body(relation))
}

pub fn create_table_body(relation: &str) -> CreateTableStatement {
    CreateTableStatement {
        relation: name(relation),
        columns: vec![ColumnDef {
            name: "id".to_string(),
            type_name: "int".to_string(),
        }],
        options: Vec::new(),
        if_not_exists: false,
    }
}

pub fn alter_table(relation: &str, relkind: ObjectType) -> Statement {
    Statement::AlterTable(AlterTableStatement {
        relation: name(relation),
        relkind,
        commands: vec!["ADD COLUMN c int".to_string()],
    })
}

pub fn drop(object_type: ObjectType, objects: &[&str]) -> Statement {
    Statement::Drop(DropStatement {
        object_type,
        objects: objects.iter().map(|object| name(object)).collect(),
        missing_ok: false,
        cascade: false,
    })
}

pub fn create_index(index: &str, relation: &str, concurrent: bool) -> Statement {
    Statement::CreateIndex(IndexStatement {
        name: Some(index.to_string()),
        relation: name(relation),
        columns: vec!["id".to_string()],
        unique: false,
        primary: false,
        is_constraint: false,
        concurrent,
    })
}

pub fn create_view(view: &str) -> Statement {
    Statement::CreateView(ViewStatement {
        name: name(view),
        replace: false,
    })
}

pub fn create_sequence(sequence: &str) -> Statement {
    Statement::CreateSequence {
        name: name(sequence),
    }
}

pub fn grant_select_on(objects: &[&str]) -> Statement {
    Statement::Grant(GrantStatement {
        is_grant: true,
        object_type: GrantObjectType::Relation,
        target: GrantTarget::Object,
        objects: objects.iter().map(|object| name(object)).collect(),
        privileges: vec!["SELECT".to_string()],
        grantees: vec!["alice".to_string()],
    })
}

pub fn vacuum(relation: Option<&str>) -> Statement {
    Statement::Vacuum(VacuumStatement {
        vacuum: true,
        analyze: false,
        full: false,
        freeze: false,
        relation: relation.map(name),
    })
}

pub fn set_variable(variable: &str, value: &str, is_local: bool) -> Statement {
    Statement::VariableSet(VariableSetStatement {
        kind: VariableSetKind::Value,
        name: Some(variable.to_string()),
        value: Some(value.to_string()),
        is_local,
    })
}

pub fn lock(relation: &str) -> Statement {
    Statement::Lock(LockStatement {
        relations: vec![name(relation)],
        mode: "ACCESS EXCLUSIVE".to_string(),
        nowait: false,
    })
}

pub fn declare_cursor(cursor: &str) -> Statement {
    Statement::Query(QueryStatement {
        cursor: Some(DeclareCursor {
            name: cursor.to_string(),
            hold: false,
        }),
        ..QueryStatement::select()
    })
}

pub fn fetch(portal: &str, count: Option<i64>) -> Statement {
    Statement::Fetch(FetchStatement {
        portal: portal.to_string(),
        is_move: false,
        count,
    })
}

pub fn copy_from(relation: &str) -> Statement {
    Statement::Copy(CopyStatement {
        relation: Some(name(relation)),
        is_from: true,
        filename: Some("/tmp/data.csv".to_string()),
    })
}

/// One statement of every kind with the tag it must classify to
pub fn sample_statements() -> Vec<(&'static str, Statement)> {
    vec![
        ("BEGIN", begin()),
        ("DECLARE CURSOR", declare_cursor("c1")),
        (
            "CLOSE CURSOR",
            Statement::ClosePortal {
                portal: Some("c1".to_string()),
            },
        ),
        ("FETCH", fetch("c1", Some(10))),
        (
            "CREATE SCHEMA",
            Statement::CreateSchema(CreateSchemaStatement {
                name: "app".to_string(),
                authorization: None,
                elements: Vec::new(),
            }),
        ),
        ("CREATE TABLE", create_table("orders")),
        (
            "CREATE FOREIGN TABLE",
            Statement::CreateForeignTable(CreateForeignTableStatement {
                table: create_table_body("remote_orders"),
                server: "files".to_string(),
            }),
        ),
        ("ALTER TABLE", alter_table("t", ObjectType::Table)),
        ("DROP TABLE", drop(ObjectType::Table, &["t"])),
        (
            "TRUNCATE TABLE",
            Statement::Truncate(TruncateStatement {
                relations: vec![name("t")],
                restart_identity: false,
                cascade: false,
            }),
        ),
        (
            "COMMENT",
            Statement::Comment(CommentStatement {
                object_type: ObjectType::Table,
                object: name("t"),
                comment: Some("orders".to_string()),
            }),
        ),
        (
            "SECURITY LABEL",
            Statement::SecurityLabel {
                object_type: ObjectType::Table,
                object: name("t"),
                provider: None,
                label: Some("secret".to_string()),
            },
        ),
        ("COPY", copy_from("t")),
        (
            "ALTER TABLE",
            Statement::Rename(RenameStatement {
                object_type: ObjectType::Table,
                object: name("t"),
                new_name: "t_old".to_string(),
            }),
        ),
        (
            "ALTER FUNCTION",
            Statement::AlterObjectSchema(AlterObjectSchemaStatement {
                object_type: ObjectType::Function,
                object: name("f"),
                new_schema: "archive".to_string(),
            }),
        ),
        (
            "ALTER VIEW",
            Statement::AlterOwner(AlterOwnerStatement {
                object_type: ObjectType::View,
                object: name("v"),
                new_owner: "bob".to_string(),
            }),
        ),
        (
            "CREATE TABLESPACE",
            Statement::CreateTablespace {
                name: "fast".to_string(),
                location: "/ssd".to_string(),
            },
        ),
        (
            "DROP TABLESPACE",
            Statement::DropTablespace {
                name: "fast".to_string(),
                missing_ok: false,
            },
        ),
        (
            "ALTER TABLESPACE",
            Statement::AlterTablespaceOptions {
                name: "fast".to_string(),
            },
        ),
        (
            "CREATE EXTENSION",
            Statement::CreateExtension {
                name: "hstore".to_string(),
            },
        ),
        (
            "ALTER EXTENSION",
            Statement::AlterExtension {
                name: "hstore".to_string(),
            },
        ),
        (
            "ALTER EXTENSION",
            Statement::AlterExtensionContents {
                name: "hstore".to_string(),
                add: true,
                object_type: ObjectType::Function,
                object: name("f"),
            },
        ),
        (
            "CREATE FOREIGN DATA WRAPPER",
            Statement::CreateForeignDataWrapper {
                name: "file_fdw".to_string(),
            },
        ),
        (
            "ALTER FOREIGN DATA WRAPPER",
            Statement::AlterForeignDataWrapper {
                name: "file_fdw".to_string(),
            },
        ),
        (
            "DROP FOREIGN DATA WRAPPER",
            Statement::DropForeignDataWrapper {
                name: "file_fdw".to_string(),
                missing_ok: true,
            },
        ),
        (
            "CREATE SERVER",
            Statement::CreateForeignServer {
                name: "files".to_string(),
                wrapper: "file_fdw".to_string(),
            },
        ),
        (
            "ALTER SERVER",
            Statement::AlterForeignServer {
                name: "files".to_string(),
            },
        ),
        (
            "DROP SERVER",
            Statement::DropForeignServer {
                name: "files".to_string(),
                missing_ok: false,
            },
        ),
        (
            "CREATE USER MAPPING",
            Statement::CreateUserMapping {
                user: "alice".to_string(),
                server: "files".to_string(),
            },
        ),
        (
            "ALTER USER MAPPING",
            Statement::AlterUserMapping {
                user: "alice".to_string(),
                server: "files".to_string(),
            },
        ),
        (
            "DROP USER MAPPING",
            Statement::DropUserMapping {
                user: "alice".to_string(),
                server: "files".to_string(),
                missing_ok: false,
            },
        ),
        (
            "PREPARE",
            Statement::Prepare(PrepareStatement {
                name: "q1".to_string(),
                query: Box::new(Statement::Query(QueryStatement::select())),
            }),
        ),
        (
            "EXECUTE",
            Statement::Execute(ExecuteStatement {
                name: "q1".to_string(),
                into: None,
                params: Vec::new(),
            }),
        ),
        (
            "DEALLOCATE ALL",
            Statement::Deallocate { name: None },
        ),
        (
            "ALTER DOMAIN",
            Statement::AlterDomain {
                name: name("positive"),
            },
        ),
        (
            "CREATE DOMAIN",
            Statement::CreateDomain {
                name: name("positive"),
                base_type: "int".to_string(),
            },
        ),
        (
            "ALTER FUNCTION",
            Statement::AlterFunction { name: name("f") },
        ),
        (
            "CREATE AGGREGATE",
            Statement::Define(DefineStatement {
                kind: ObjectType::Aggregate,
                name: name("my_sum"),
            }),
        ),
        (
            "CREATE TYPE",
            Statement::CompositeType {
                name: name("pair"),
            },
        ),
        (
            "CREATE TYPE",
            Statement::CreateEnum {
                name: name("mood"),
                labels: vec!["sad".to_string(), "happy".to_string()],
            },
        ),
        (
            "ALTER TYPE",
            Statement::AlterEnum {
                name: name("mood"),
                new_value: "ok".to_string(),
            },
        ),
        ("CREATE VIEW", create_view("recent")),
        (
            "CREATE FUNCTION",
            Statement::CreateFunction {
                name: name("f"),
                replace: true,
            },
        ),
        (
            "DROP FUNCTION",
            Statement::RemoveFunction(RemoveFunctionStatement {
                kind: ObjectType::Function,
                name: name("f"),
                missing_ok: false,
            }),
        ),
        ("CREATE INDEX", create_index("t_id", "t", false)),
        (
            "CREATE RULE",
            Statement::CreateRule(RuleStatement {
                name: "r".to_string(),
                relation: name("t"),
                replace: false,
            }),
        ),
        ("CREATE SEQUENCE", create_sequence("ids")),
        (
            "ALTER SEQUENCE",
            Statement::AlterSequence { name: name("seq") },
        ),
        (
            "DO",
            Statement::Do {
                code: "BEGIN NULL; END".to_string(),
                language: None,
            },
        ),
        ("GRANT", grant_select_on(&["t"])),
        (
            "REVOKE ROLE",
            Statement::GrantRole(GrantRoleStatement {
                is_grant: false,
                roles: vec!["admin".to_string()],
                grantees: vec!["alice".to_string()],
            }),
        ),
        (
            "ALTER DEFAULT PRIVILEGES",
            Statement::AlterDefaultPrivileges {
                roles: Vec::new(),
                grant: GrantStatement {
                    is_grant: true,
                    object_type: GrantObjectType::Relation,
                    target: GrantTarget::Defaults,
                    objects: Vec::new(),
                    privileges: vec!["SELECT".to_string()],
                    grantees: vec!["alice".to_string()],
                },
            },
        ),
        (
            "CREATE DATABASE",
            Statement::CreateDatabase {
                name: "sales".to_string(),
            },
        ),
        (
            "ALTER DATABASE",
            Statement::AlterDatabase {
                name: "sales".to_string(),
            },
        ),
        (
            "ALTER DATABASE",
            Statement::AlterDatabaseSet {
                name: "sales".to_string(),
                setting: "work_mem = '64MB'".to_string(),
            },
        ),
        (
            "DROP DATABASE",
            Statement::DropDatabase {
                name: "sales".to_string(),
                missing_ok: false,
            },
        ),
        (
            "NOTIFY",
            Statement::Notify {
                channel: "jobs".to_string(),
                payload: None,
            },
        ),
        (
            "LISTEN",
            Statement::Listen {
                channel: "jobs".to_string(),
            },
        ),
        ("UNLISTEN", Statement::Unlisten { channel: None }),
        (
            "LOAD",
            Statement::Load {
                filename: "plugin.so".to_string(),
            },
        ),
        (
            "CLUSTER",
            Statement::Cluster {
                relation: Some(name("t")),
                index: None,
            },
        ),
        ("VACUUM", vacuum(Some("t"))),
        (
            "EXPLAIN",
            Statement::Explain(ExplainStatement {
                analyze: false,
                verbose: false,
                query: Box::new(Statement::Query(QueryStatement::select())),
            }),
        ),
        ("CHECKPOINT", Statement::Checkpoint),
        (
            "REINDEX",
            Statement::Reindex(ReindexStatement {
                kind: ObjectType::Table,
                name: name("t"),
            }),
        ),
        ("SET", set_variable("work_mem", "'64MB'", false)),
        (
            "SHOW",
            Statement::VariableShow {
                name: "work_mem".to_string(),
            },
        ),
        (
            "DISCARD ALL",
            Statement::Discard {
                target: DiscardTarget::All,
            },
        ),
        (
            "SET CONSTRAINTS",
            Statement::ConstraintsSet {
                constraints: Vec::new(),
                deferred: true,
            },
        ),
        (
            "CREATE TRIGGER",
            Statement::CreateTrigger {
                name: "audit".to_string(),
                relation: name("t"),
            },
        ),
        (
            "DROP RULE",
            Statement::DropProperty(DropPropertyStatement {
                kind: ObjectType::Rule,
                property: "r".to_string(),
                relation: name("t"),
                missing_ok: false,
            }),
        ),
        (
            "CREATE LANGUAGE",
            Statement::CreateLanguage {
                name: "plperl".to_string(),
            },
        ),
        (
            "DROP LANGUAGE",
            Statement::DropLanguage {
                name: "plperl".to_string(),
                missing_ok: false,
            },
        ),
        (
            "CREATE ROLE",
            Statement::CreateRole {
                name: "alice".to_string(),
                kind: RoleKind::User,
            },
        ),
        (
            "ALTER ROLE",
            Statement::AlterRole {
                name: "alice".to_string(),
            },
        ),
        (
            "ALTER ROLE",
            Statement::AlterRoleSet {
                name: "alice".to_string(),
                setting: "search_path = app".to_string(),
            },
        ),
        (
            "DROP ROLE",
            Statement::DropRole {
                names: vec!["alice".to_string()],
                missing_ok: false,
            },
        ),
        (
            "DROP OWNED",
            Statement::DropOwned {
                roles: vec!["alice".to_string()],
            },
        ),
        (
            "REASSIGN OWNED",
            Statement::ReassignOwned {
                roles: vec!["alice".to_string()],
                new_role: "bob".to_string(),
            },
        ),
        ("LOCK TABLE", lock("t")),
        (
            "CREATE CONVERSION",
            Statement::CreateConversion {
                name: name("latin_to_utf8"),
            },
        ),
        (
            "CREATE CAST",
            Statement::CreateCast {
                source_type: "text".to_string(),
                target_type: "mood".to_string(),
            },
        ),
        (
            "DROP CAST",
            Statement::DropCast {
                source_type: "text".to_string(),
                target_type: "mood".to_string(),
                missing_ok: true,
            },
        ),
        (
            "CREATE OPERATOR CLASS",
            Statement::CreateOperatorClass {
                name: name("pair_ops"),
            },
        ),
        (
            "CREATE OPERATOR FAMILY",
            Statement::CreateOperatorFamily {
                name: name("pair_family"),
            },
        ),
        (
            "ALTER OPERATOR FAMILY",
            Statement::AlterOperatorFamily {
                name: name("pair_family"),
            },
        ),
        (
            "DROP OPERATOR CLASS",
            Statement::DropOperatorClass {
                name: name("pair_ops"),
                missing_ok: false,
            },
        ),
        (
            "DROP OPERATOR FAMILY",
            Statement::DropOperatorFamily {
                name: name("pair_family"),
                missing_ok: false,
            },
        ),
        (
            "ALTER TEXT SEARCH DICTIONARY",
            Statement::AlterTsDictionary {
                name: name("english_stem"),
            },
        ),
        (
            "ALTER TEXT SEARCH CONFIGURATION",
            Statement::AlterTsConfiguration {
                name: name("english"),
            },
        ),
        (
            "BARRIER",
            Statement::Barrier {
                id: Some("b1".to_string()),
            },
        ),
        (
            "CLEAN CONNECTION",
            Statement::CleanConnection(CleanConnectionStatement::for_database("sales")),
        ),
    ]
}
