// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Parsed utility statement tree
//!
//! Statements arrive here already parsed and analyzed. The dispatcher never
//! mutates them; expansion produces new statement values instead.

use enum_kinds::EnumKind;
use serde::{Deserialize, Serialize};

pub use crate::txn::isolation::IsolationLevel;

/// Possibly schema-qualified object name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    #[serde(default)]
    pub schema: Option<String>,
    pub name: String,
}

impl QualifiedName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        match name.split_once('.') {
            Some((schema, rel)) => QualifiedName::qualified(schema, rel),
            None => QualifiedName::new(name),
        }
    }
}

/// Catalog object categories named by generic DDL (DROP, COMMENT, RENAME, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectType {
    Aggregate,
    Attribute,
    Cast,
    Column,
    Constraint,
    Collation,
    Conversion,
    Database,
    Domain,
    Extension,
    ForeignDataWrapper,
    ForeignServer,
    ForeignTable,
    Function,
    Index,
    Language,
    LargeObject,
    OperatorClass,
    Operator,
    OperatorFamily,
    Role,
    Rule,
    Schema,
    Sequence,
    Table,
    Tablespace,
    Trigger,
    TsConfiguration,
    TsDictionary,
    TsParser,
    TsTemplate,
    Type,
    View,
}

/// Top-level statement variants handled by the utility dispatcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, EnumKind)]
#[enum_kind(StatementKind, derive(Hash, PartialOrd, Ord))]
pub enum Statement {
    Transaction(TransactionStatement),
    /// Planned query; only a cursor declaration may reach utility dispatch
    Query(QueryStatement),
    ClosePortal {
        #[serde(default)]
        portal: Option<String>,
    },
    Fetch(FetchStatement),

    // Schema and relations
    CreateSchema(CreateSchemaStatement),
    CreateTable(CreateTableStatement),
    CreateForeignTable(CreateForeignTableStatement),
    AlterTable(AlterTableStatement),
    Drop(DropStatement),
    Truncate(TruncateStatement),
    Comment(CommentStatement),
    SecurityLabel {
        object_type: ObjectType,
        object: QualifiedName,
        #[serde(default)]
        provider: Option<String>,
        #[serde(default)]
        label: Option<String>,
    },
    Copy(CopyStatement),
    Rename(RenameStatement),
    AlterObjectSchema(AlterObjectSchemaStatement),
    AlterOwner(AlterOwnerStatement),

    // Tablespaces
    CreateTablespace {
        name: String,
        location: String,
    },
    DropTablespace {
        name: String,
        #[serde(default)]
        missing_ok: bool,
    },
    AlterTablespaceOptions {
        name: String,
    },

    // Extensions and foreign data
    CreateExtension {
        name: String,
    },
    AlterExtension {
        name: String,
    },
    AlterExtensionContents {
        name: String,
        add: bool,
        object_type: ObjectType,
        object: QualifiedName,
    },
    CreateForeignDataWrapper {
        name: String,
    },
    AlterForeignDataWrapper {
        name: String,
    },
    DropForeignDataWrapper {
        name: String,
        #[serde(default)]
        missing_ok: bool,
    },
    CreateForeignServer {
        name: String,
        wrapper: String,
    },
    AlterForeignServer {
        name: String,
    },
    DropForeignServer {
        name: String,
        #[serde(default)]
        missing_ok: bool,
    },
    CreateUserMapping {
        user: String,
        server: String,
    },
    AlterUserMapping {
        user: String,
        server: String,
    },
    DropUserMapping {
        user: String,
        server: String,
        #[serde(default)]
        missing_ok: bool,
    },

    // Prepared statements
    Prepare(PrepareStatement),
    Execute(ExecuteStatement),
    Deallocate {
        #[serde(default)]
        name: Option<String>,
    },

    // Types, domains, functions
    AlterDomain {
        name: QualifiedName,
    },
    CreateDomain {
        name: QualifiedName,
        base_type: String,
    },
    AlterFunction {
        name: QualifiedName,
    },
    Define(DefineStatement),
    CompositeType {
        name: QualifiedName,
    },
    CreateEnum {
        name: QualifiedName,
        labels: Vec<String>,
    },
    AlterEnum {
        name: QualifiedName,
        new_value: String,
    },
    CreateView(ViewStatement),
    CreateFunction {
        name: QualifiedName,
        #[serde(default)]
        replace: bool,
    },
    RemoveFunction(RemoveFunctionStatement),
    CreateIndex(IndexStatement),
    CreateRule(RuleStatement),
    CreateSequence {
        name: QualifiedName,
    },
    AlterSequence {
        name: QualifiedName,
    },
    Do {
        code: String,
        #[serde(default)]
        language: Option<String>,
    },

    // Privileges
    Grant(GrantStatement),
    GrantRole(GrantRoleStatement),
    AlterDefaultPrivileges {
        #[serde(default)]
        roles: Vec<String>,
        grant: GrantStatement,
    },

    // Databases
    CreateDatabase {
        name: String,
    },
    AlterDatabase {
        name: String,
    },
    AlterDatabaseSet {
        name: String,
        setting: String,
    },
    DropDatabase {
        name: String,
        #[serde(default)]
        missing_ok: bool,
    },

    // Asynchronous notification
    Notify {
        channel: String,
        #[serde(default)]
        payload: Option<String>,
    },
    Listen {
        channel: String,
    },
    Unlisten {
        #[serde(default)]
        channel: Option<String>,
    },

    // Maintenance
    Load {
        filename: String,
    },
    Cluster {
        #[serde(default)]
        relation: Option<QualifiedName>,
        #[serde(default)]
        index: Option<String>,
    },
    Vacuum(VacuumStatement),
    Explain(ExplainStatement),
    Checkpoint,
    Reindex(ReindexStatement),

    // Session state
    VariableSet(VariableSetStatement),
    VariableShow {
        name: String,
    },
    Discard {
        target: DiscardTarget,
    },
    ConstraintsSet {
        #[serde(default)]
        constraints: Vec<QualifiedName>,
        deferred: bool,
    },

    // Triggers, rules, languages
    CreateTrigger {
        name: String,
        relation: QualifiedName,
    },
    DropProperty(DropPropertyStatement),
    CreateLanguage {
        name: String,
    },
    DropLanguage {
        name: String,
        #[serde(default)]
        missing_ok: bool,
    },

    // Roles
    CreateRole {
        name: String,
        #[serde(default)]
        kind: RoleKind,
    },
    AlterRole {
        name: String,
    },
    AlterRoleSet {
        name: String,
        setting: String,
    },
    DropRole {
        names: Vec<String>,
        #[serde(default)]
        missing_ok: bool,
    },
    DropOwned {
        roles: Vec<String>,
    },
    ReassignOwned {
        roles: Vec<String>,
        new_role: String,
    },

    Lock(LockStatement),

    // Conversions, casts, operator classes, text search
    CreateConversion {
        name: QualifiedName,
    },
    CreateCast {
        source_type: String,
        target_type: String,
    },
    DropCast {
        source_type: String,
        target_type: String,
        #[serde(default)]
        missing_ok: bool,
    },
    CreateOperatorClass {
        name: QualifiedName,
    },
    CreateOperatorFamily {
        name: QualifiedName,
    },
    AlterOperatorFamily {
        name: QualifiedName,
    },
    DropOperatorClass {
        name: QualifiedName,
        #[serde(default)]
        missing_ok: bool,
    },
    DropOperatorFamily {
        name: QualifiedName,
        #[serde(default)]
        missing_ok: bool,
    },
    AlterTsDictionary {
        name: QualifiedName,
    },
    AlterTsConfiguration {
        name: QualifiedName,
    },

    // Cluster administration
    Barrier {
        #[serde(default)]
        id: Option<String>,
    },
    CleanConnection(CleanConnectionStatement),
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        StatementKind::from(self)
    }

    /// True for the two forms that expansion hands back as the primary object
    pub fn is_primal_create(&self) -> bool {
        matches!(
            self,
            Statement::CreateTable(_) | Statement::CreateForeignTable(_)
        )
    }
}

/// Transaction control statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransactionStatement {
    Begin {
        #[serde(default)]
        options: Vec<TransactionOption>,
    },
    Start {
        #[serde(default)]
        options: Vec<TransactionOption>,
    },
    Commit,
    Rollback,
    Savepoint {
        name: String,
    },
    Release {
        name: String,
    },
    RollbackTo {
        name: String,
    },
    Prepare {
        gid: String,
    },
    CommitPrepared {
        gid: String,
    },
    RollbackPrepared {
        gid: String,
    },
}

/// Transaction characteristics given on BEGIN / START TRANSACTION
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionOption {
    IsolationLevel(IsolationLevel),
    ReadOnly(bool),
    Deferrable(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryCommand {
    Select,
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowMarkKind {
    Exclusive,
    Share,
}

/// Planned query as handed over by the planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryStatement {
    pub command: QueryCommand,
    #[serde(default)]
    pub into: Option<QualifiedName>,
    /// Row marks in plan order; the first one decides FOR UPDATE vs FOR SHARE
    #[serde(default)]
    pub row_marks: Vec<RowMarkKind>,
    #[serde(default)]
    pub has_modifying_cte: bool,
    #[serde(default)]
    pub cursor: Option<DeclareCursor>,
}

impl QueryStatement {
    pub fn select() -> Self {
        Self {
            command: QueryCommand::Select,
            into: None,
            row_marks: Vec::new(),
            has_modifying_cte: false,
            cursor: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareCursor {
    pub name: String,
    #[serde(default)]
    pub hold: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchStatement {
    pub portal: String,
    #[serde(default)]
    pub is_move: bool,
    #[serde(default)]
    pub count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSchemaStatement {
    pub name: String,
    #[serde(default)]
    pub authorization: Option<String>,
    /// Schema elements created together with the schema
    #[serde(default)]
    pub elements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTableStatement {
    pub relation: QualifiedName,
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    /// Storage options, passed through to the secondary storage object
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub if_not_exists: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateForeignTableStatement {
    pub table: CreateTableStatement,
    pub server: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterTableStatement {
    pub relation: QualifiedName,
    /// Relation kind as written (ALTER TABLE / ALTER VIEW / ALTER SEQUENCE ...)
    pub relkind: ObjectType,
    #[serde(default)]
    pub commands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropStatement {
    pub object_type: ObjectType,
    pub objects: Vec<QualifiedName>,
    #[serde(default)]
    pub missing_ok: bool,
    #[serde(default)]
    pub cascade: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruncateStatement {
    pub relations: Vec<QualifiedName>,
    #[serde(default)]
    pub restart_identity: bool,
    #[serde(default)]
    pub cascade: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentStatement {
    pub object_type: ObjectType,
    pub object: QualifiedName,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyStatement {
    #[serde(default)]
    pub relation: Option<QualifiedName>,
    pub is_from: bool,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareStatement {
    pub name: String,
    pub query: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteStatement {
    pub name: String,
    /// Set for CREATE TABLE AS EXECUTE
    #[serde(default)]
    pub into: Option<QualifiedName>,
    #[serde(default)]
    pub params: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameStatement {
    pub object_type: ObjectType,
    pub object: QualifiedName,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterObjectSchemaStatement {
    pub object_type: ObjectType,
    pub object: QualifiedName,
    pub new_schema: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterOwnerStatement {
    pub object_type: ObjectType,
    pub object: QualifiedName,
    pub new_owner: String,
}

/// CREATE AGGREGATE / OPERATOR / TYPE / COLLATION / TEXT SEARCH ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefineStatement {
    pub kind: ObjectType,
    pub name: QualifiedName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewStatement {
    pub name: QualifiedName,
    #[serde(default)]
    pub replace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveFunctionStatement {
    /// Function, Aggregate or Operator
    pub kind: ObjectType,
    pub name: QualifiedName,
    #[serde(default)]
    pub missing_ok: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStatement {
    #[serde(default)]
    pub name: Option<String>,
    pub relation: QualifiedName,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub primary: bool,
    /// Index built on behalf of a table constraint
    #[serde(default)]
    pub is_constraint: bool,
    #[serde(default)]
    pub concurrent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleStatement {
    pub name: String,
    pub relation: QualifiedName,
    #[serde(default)]
    pub replace: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantObjectType {
    Relation,
    Sequence,
    Database,
    ForeignDataWrapper,
    ForeignServer,
    Function,
    Language,
    LargeObject,
    Namespace,
    Tablespace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantTarget {
    /// Explicitly listed objects
    Object,
    /// ALL TABLES / SEQUENCES / FUNCTIONS IN SCHEMA
    AllInSchema,
    Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantStatement {
    pub is_grant: bool,
    pub object_type: GrantObjectType,
    pub target: GrantTarget,
    pub objects: Vec<QualifiedName>,
    #[serde(default)]
    pub privileges: Vec<String>,
    #[serde(default)]
    pub grantees: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantRoleStatement {
    pub is_grant: bool,
    pub roles: Vec<String>,
    pub grantees: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacuumStatement {
    /// VACUUM requested; false means a bare ANALYZE
    pub vacuum: bool,
    #[serde(default)]
    pub analyze: bool,
    #[serde(default)]
    pub full: bool,
    #[serde(default)]
    pub freeze: bool,
    #[serde(default)]
    pub relation: Option<QualifiedName>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainStatement {
    #[serde(default)]
    pub analyze: bool,
    #[serde(default)]
    pub verbose: bool,
    pub query: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReindexStatement {
    /// Index, Table or Database
    pub kind: ObjectType,
    pub name: QualifiedName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableSetKind {
    Value,
    Default,
    Current,
    Multi,
    Reset,
    ResetAll,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSetStatement {
    pub kind: VariableSetKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    /// SET LOCAL
    #[serde(default)]
    pub is_local: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscardTarget {
    All,
    Plans,
    Temp,
}

/// DROP RULE / DROP TRIGGER
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropPropertyStatement {
    pub kind: ObjectType,
    pub property: String,
    pub relation: QualifiedName,
    #[serde(default)]
    pub missing_ok: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoleKind {
    #[default]
    Role,
    User,
    Group,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockStatement {
    pub relations: Vec<QualifiedName>,
    pub mode: String,
    #[serde(default)]
    pub nowait: bool,
}

/// CLEAN CONNECTION TO {COORDINATOR (nodes) | NODE (nodes) | ALL} [FORCE]
/// [FOR DATABASE name] [TO USER name]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanConnectionStatement {
    /// Empty means every node
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub force: bool,
}

impl CleanConnectionStatement {
    pub fn for_database(database: impl Into<String>) -> Self {
        Self {
            nodes: Vec::new(),
            database: Some(database.into()),
            user: None,
            force: false,
        }
    }
}
