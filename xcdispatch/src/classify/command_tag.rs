// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command tags reported to clients and used in error messages

use crate::ast::{
    DiscardTarget, ObjectType, QueryCommand, QueryStatement, RowMarkKind, Statement,
    TransactionStatement, VariableSetKind,
};

/// Tag for sub-kind combinations that have no command of their own
pub const UNKNOWN_TAG: &str = "???";

/// Human-readable tag for a statement
pub fn command_tag(statement: &Statement) -> &'static str {
    match statement {
        Statement::Transaction(txn) => transaction_tag(txn),
        Statement::Query(query) => query_tag(query),
        Statement::ClosePortal { portal } => match portal {
            Some(_) => "CLOSE CURSOR",
            None => "CLOSE CURSOR ALL",
        },
        Statement::Fetch(fetch) => {
            if fetch.is_move {
                "MOVE"
            } else {
                "FETCH"
            }
        }
        Statement::CreateSchema(_) => "CREATE SCHEMA",
        Statement::CreateTable(_) => "CREATE TABLE",
        Statement::CreateForeignTable(_) => "CREATE FOREIGN TABLE",
        Statement::AlterTable(alter) => alter_object_type_tag(alter.relkind),
        Statement::Drop(drop) => drop_tag(drop.object_type),
        Statement::Truncate(_) => "TRUNCATE TABLE",
        Statement::Comment(_) => "COMMENT",
        Statement::SecurityLabel { .. } => "SECURITY LABEL",
        Statement::Copy(_) => "COPY",
        Statement::Rename(rename) => alter_object_type_tag(rename.object_type),
        Statement::AlterObjectSchema(alter) => alter_object_type_tag(alter.object_type),
        Statement::AlterOwner(alter) => alter_object_type_tag(alter.object_type),
        Statement::CreateTablespace { .. } => "CREATE TABLESPACE",
        Statement::DropTablespace { .. } => "DROP TABLESPACE",
        Statement::AlterTablespaceOptions { .. } => "ALTER TABLESPACE",
        Statement::CreateExtension { .. } => "CREATE EXTENSION",
        Statement::AlterExtension { .. } | Statement::AlterExtensionContents { .. } => {
            "ALTER EXTENSION"
        }
        Statement::CreateForeignDataWrapper { .. } => "CREATE FOREIGN DATA WRAPPER",
        Statement::AlterForeignDataWrapper { .. } => "ALTER FOREIGN DATA WRAPPER",
        Statement::DropForeignDataWrapper { .. } => "DROP FOREIGN DATA WRAPPER",
        Statement::CreateForeignServer { .. } => "CREATE SERVER",
        Statement::AlterForeignServer { .. } => "ALTER SERVER",
        Statement::DropForeignServer { .. } => "DROP SERVER",
        Statement::CreateUserMapping { .. } => "CREATE USER MAPPING",
        Statement::AlterUserMapping { .. } => "ALTER USER MAPPING",
        Statement::DropUserMapping { .. } => "DROP USER MAPPING",
        Statement::Prepare(_) => "PREPARE",
        Statement::Execute(_) => "EXECUTE",
        Statement::Deallocate { name } => match name {
            Some(_) => "DEALLOCATE",
            None => "DEALLOCATE ALL",
        },
        Statement::AlterDomain { .. } => "ALTER DOMAIN",
        Statement::CreateDomain { .. } => "CREATE DOMAIN",
        Statement::AlterFunction { .. } => "ALTER FUNCTION",
        Statement::Define(define) => define_tag(define.kind),
        Statement::CompositeType { .. } | Statement::CreateEnum { .. } => "CREATE TYPE",
        Statement::AlterEnum { .. } => "ALTER TYPE",
        Statement::CreateView(_) => "CREATE VIEW",
        Statement::CreateFunction { .. } => "CREATE FUNCTION",
        Statement::RemoveFunction(remove) => match remove.kind {
            ObjectType::Function => "DROP FUNCTION",
            ObjectType::Aggregate => "DROP AGGREGATE",
            ObjectType::Operator => "DROP OPERATOR",
            _ => UNKNOWN_TAG,
        },
        Statement::CreateIndex(_) => "CREATE INDEX",
        Statement::CreateRule(_) => "CREATE RULE",
        Statement::CreateSequence { .. } => "CREATE SEQUENCE",
        Statement::AlterSequence { .. } => "ALTER SEQUENCE",
        Statement::Do { .. } => "DO",
        Statement::Grant(grant) => {
            if grant.is_grant {
                "GRANT"
            } else {
                "REVOKE"
            }
        }
        Statement::GrantRole(grant) => {
            if grant.is_grant {
                "GRANT ROLE"
            } else {
                "REVOKE ROLE"
            }
        }
        Statement::AlterDefaultPrivileges { .. } => "ALTER DEFAULT PRIVILEGES",
        Statement::CreateDatabase { .. } => "CREATE DATABASE",
        Statement::AlterDatabase { .. } | Statement::AlterDatabaseSet { .. } => "ALTER DATABASE",
        Statement::DropDatabase { .. } => "DROP DATABASE",
        Statement::Notify { .. } => "NOTIFY",
        Statement::Listen { .. } => "LISTEN",
        Statement::Unlisten { .. } => "UNLISTEN",
        Statement::Load { .. } => "LOAD",
        Statement::Cluster { .. } => "CLUSTER",
        Statement::Vacuum(vacuum) => {
            if vacuum.vacuum {
                "VACUUM"
            } else {
                "ANALYZE"
            }
        }
        Statement::Explain(_) => "EXPLAIN",
        Statement::Checkpoint => "CHECKPOINT",
        Statement::Reindex(_) => "REINDEX",
        Statement::VariableSet(set) => match set.kind {
            VariableSetKind::Value
            | VariableSetKind::Default
            | VariableSetKind::Current
            | VariableSetKind::Multi => "SET",
            VariableSetKind::Reset | VariableSetKind::ResetAll => "RESET",
        },
        Statement::VariableShow { .. } => "SHOW",
        Statement::Discard { target } => match target {
            DiscardTarget::All => "DISCARD ALL",
            DiscardTarget::Plans => "DISCARD PLANS",
            DiscardTarget::Temp => "DISCARD TEMP",
        },
        Statement::ConstraintsSet { .. } => "SET CONSTRAINTS",
        Statement::CreateTrigger { .. } => "CREATE TRIGGER",
        Statement::DropProperty(drop) => match drop.kind {
            ObjectType::Trigger => "DROP TRIGGER",
            ObjectType::Rule => "DROP RULE",
            _ => UNKNOWN_TAG,
        },
        Statement::CreateLanguage { .. } => "CREATE LANGUAGE",
        Statement::DropLanguage { .. } => "DROP LANGUAGE",
        Statement::CreateRole { .. } => "CREATE ROLE",
        Statement::AlterRole { .. } | Statement::AlterRoleSet { .. } => "ALTER ROLE",
        Statement::DropRole { .. } => "DROP ROLE",
        Statement::DropOwned { .. } => "DROP OWNED",
        Statement::ReassignOwned { .. } => "REASSIGN OWNED",
        Statement::Lock(_) => "LOCK TABLE",
        Statement::CreateConversion { .. } => "CREATE CONVERSION",
        Statement::CreateCast { .. } => "CREATE CAST",
        Statement::DropCast { .. } => "DROP CAST",
        Statement::CreateOperatorClass { .. } => "CREATE OPERATOR CLASS",
        Statement::CreateOperatorFamily { .. } => "CREATE OPERATOR FAMILY",
        Statement::AlterOperatorFamily { .. } => "ALTER OPERATOR FAMILY",
        Statement::DropOperatorClass { .. } => "DROP OPERATOR CLASS",
        Statement::DropOperatorFamily { .. } => "DROP OPERATOR FAMILY",
        Statement::AlterTsDictionary { .. } => "ALTER TEXT SEARCH DICTIONARY",
        Statement::AlterTsConfiguration { .. } => "ALTER TEXT SEARCH CONFIGURATION",
        Statement::Barrier { .. } => "BARRIER",
        Statement::CleanConnection(_) => "CLEAN CONNECTION",
    }
}

fn transaction_tag(statement: &TransactionStatement) -> &'static str {
    match statement {
        TransactionStatement::Begin { .. } => "BEGIN",
        TransactionStatement::Start { .. } => "START TRANSACTION",
        TransactionStatement::Commit => "COMMIT",
        TransactionStatement::Rollback | TransactionStatement::RollbackTo { .. } => "ROLLBACK",
        TransactionStatement::Savepoint { .. } => "SAVEPOINT",
        TransactionStatement::Release { .. } => "RELEASE",
        TransactionStatement::Prepare { .. } => "PREPARE TRANSACTION",
        TransactionStatement::CommitPrepared { .. } => "COMMIT PREPARED",
        TransactionStatement::RollbackPrepared { .. } => "ROLLBACK PREPARED",
    }
}

fn query_tag(query: &QueryStatement) -> &'static str {
    match query.command {
        QueryCommand::Select => {
            if query.cursor.is_some() {
                "DECLARE CURSOR"
            } else if query.into.is_some() {
                "SELECT INTO"
            } else if let Some(mark) = query.row_marks.first() {
                match mark {
                    RowMarkKind::Exclusive => "SELECT FOR UPDATE",
                    RowMarkKind::Share => "SELECT FOR SHARE",
                }
            } else {
                "SELECT"
            }
        }
        QueryCommand::Insert => "INSERT",
        QueryCommand::Update => "UPDATE",
        QueryCommand::Delete => "DELETE",
    }
}

fn drop_tag(object_type: ObjectType) -> &'static str {
    match object_type {
        ObjectType::Table => "DROP TABLE",
        ObjectType::Sequence => "DROP SEQUENCE",
        ObjectType::View => "DROP VIEW",
        ObjectType::Index => "DROP INDEX",
        ObjectType::ForeignTable => "DROP FOREIGN TABLE",
        ObjectType::Type => "DROP TYPE",
        ObjectType::Domain => "DROP DOMAIN",
        ObjectType::Collation => "DROP COLLATION",
        ObjectType::Conversion => "DROP CONVERSION",
        ObjectType::Schema => "DROP SCHEMA",
        ObjectType::TsParser => "DROP TEXT SEARCH PARSER",
        ObjectType::TsDictionary => "DROP TEXT SEARCH DICTIONARY",
        ObjectType::TsTemplate => "DROP TEXT SEARCH TEMPLATE",
        ObjectType::TsConfiguration => "DROP TEXT SEARCH CONFIGURATION",
        ObjectType::Extension => "DROP EXTENSION",
        _ => UNKNOWN_TAG,
    }
}

fn define_tag(kind: ObjectType) -> &'static str {
    match kind {
        ObjectType::Aggregate => "CREATE AGGREGATE",
        ObjectType::Operator => "CREATE OPERATOR",
        ObjectType::Type => "CREATE TYPE",
        ObjectType::TsParser => "CREATE TEXT SEARCH PARSER",
        ObjectType::TsDictionary => "CREATE TEXT SEARCH DICTIONARY",
        ObjectType::TsTemplate => "CREATE TEXT SEARCH TEMPLATE",
        ObjectType::TsConfiguration => "CREATE TEXT SEARCH CONFIGURATION",
        ObjectType::Collation => "CREATE COLLATION",
        _ => UNKNOWN_TAG,
    }
}

/// Tag for ALTER / RENAME / SET SCHEMA / OWNER TO on an object type
pub fn alter_object_type_tag(object_type: ObjectType) -> &'static str {
    match object_type {
        ObjectType::Aggregate => "ALTER AGGREGATE",
        ObjectType::Attribute => "ALTER TYPE",
        ObjectType::Cast => "ALTER CAST",
        ObjectType::Collation => "ALTER COLLATION",
        ObjectType::Column | ObjectType::Constraint | ObjectType::Table => "ALTER TABLE",
        ObjectType::Conversion => "ALTER CONVERSION",
        ObjectType::Database => "ALTER DATABASE",
        ObjectType::Domain => "ALTER DOMAIN",
        ObjectType::Extension => "ALTER EXTENSION",
        ObjectType::ForeignDataWrapper => "ALTER FOREIGN DATA WRAPPER",
        ObjectType::ForeignServer => "ALTER SERVER",
        ObjectType::ForeignTable => "ALTER FOREIGN TABLE",
        ObjectType::Function => "ALTER FUNCTION",
        ObjectType::Index => "ALTER INDEX",
        ObjectType::Language => "ALTER LANGUAGE",
        ObjectType::LargeObject => "ALTER LARGE OBJECT",
        ObjectType::OperatorClass => "ALTER OPERATOR CLASS",
        ObjectType::Operator => "ALTER OPERATOR",
        ObjectType::OperatorFamily => "ALTER OPERATOR FAMILY",
        ObjectType::Role => "ALTER ROLE",
        ObjectType::Rule => "ALTER RULE",
        ObjectType::Schema => "ALTER SCHEMA",
        ObjectType::Sequence => "ALTER SEQUENCE",
        ObjectType::Tablespace => "ALTER TABLESPACE",
        ObjectType::Trigger => "ALTER TRIGGER",
        ObjectType::TsConfiguration => "ALTER TEXT SEARCH CONFIGURATION",
        ObjectType::TsDictionary => "ALTER TEXT SEARCH DICTIONARY",
        ObjectType::TsParser => "ALTER TEXT SEARCH PARSER",
        ObjectType::TsTemplate => "ALTER TEXT SEARCH TEMPLATE",
        ObjectType::Type => "ALTER TYPE",
        ObjectType::View => "ALTER VIEW",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DeclareCursor, DropStatement, QualifiedName, VacuumStatement};

    #[test]
    fn test_query_tags() {
        let mut query = QueryStatement::select();
        assert_eq!(query_tag(&query), "SELECT");

        query.row_marks = vec![RowMarkKind::Share, RowMarkKind::Exclusive];
        assert_eq!(query_tag(&query), "SELECT FOR SHARE");

        query.into = Some(QualifiedName::new("snapshot"));
        assert_eq!(query_tag(&query), "SELECT INTO");

        query.cursor = Some(DeclareCursor {
            name: "c1".into(),
            hold: false,
        });
        assert_eq!(query_tag(&query), "DECLARE CURSOR");
    }

    #[test]
    fn test_drop_tags() {
        let drop = |object_type| {
            Statement::Drop(DropStatement {
                object_type,
                objects: vec![QualifiedName::new("x")],
                missing_ok: false,
                cascade: false,
            })
        };
        assert_eq!(command_tag(&drop(ObjectType::View)), "DROP VIEW");
        assert_eq!(
            command_tag(&drop(ObjectType::TsTemplate)),
            "DROP TEXT SEARCH TEMPLATE"
        );
        // Rules are dropped through DROP RULE ... ON, never through generic DROP
        assert_eq!(command_tag(&drop(ObjectType::Rule)), UNKNOWN_TAG);
    }

    #[test]
    fn test_vacuum_without_vacuum_option_is_analyze() {
        let stmt = Statement::Vacuum(VacuumStatement {
            vacuum: false,
            analyze: true,
            full: false,
            freeze: false,
            relation: None,
        });
        assert_eq!(command_tag(&stmt), "ANALYZE");
    }

    #[test]
    fn test_rollback_to_savepoint_tag() {
        let stmt = Statement::Transaction(TransactionStatement::RollbackTo { name: "s".into() });
        assert_eq!(command_tag(&stmt), "ROLLBACK");
    }
}
