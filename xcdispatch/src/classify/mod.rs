// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement classifier
//!
//! Maps every statement to a command tag and a logging class. Pure and
//! stateless apart from the session object lookup used to look through
//! EXECUTE and FETCH.

pub mod command_tag;
pub mod log_level;
pub mod tuples;

pub use command_tag::{command_tag, UNKNOWN_TAG};
pub use log_level::{log_level, LogStmtLevel};
pub use tuples::{command_is_read_only, utility_returns_tuples};

use crate::ast::Statement;

/// Classifier output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tag: &'static str,
    pub log_level: LogStmtLevel,
}

/// A statement previously registered with PREPARE
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedStatementInfo {
    pub statement: Statement,
    pub returns_tuples: bool,
}

/// Session-local objects the classifier may need to look through
pub trait SessionObjectLookup {
    fn prepared_statement(&self, name: &str) -> Option<PreparedStatementInfo>;

    /// `None` when no portal of that name is open
    fn portal_returns_tuples(&self, name: &str) -> Option<bool>;
}

/// Lookup for callers without session objects
pub struct NoSessionObjects;

impl SessionObjectLookup for NoSessionObjects {
    fn prepared_statement(&self, _name: &str) -> Option<PreparedStatementInfo> {
        None
    }

    fn portal_returns_tuples(&self, _name: &str) -> Option<bool> {
        None
    }
}

/// Classify a statement with no session objects in scope
pub fn classify(statement: &Statement) -> Classification {
    classify_with(statement, &NoSessionObjects)
}

pub fn classify_with(statement: &Statement, lookup: &dyn SessionObjectLookup) -> Classification {
    Classification {
        tag: command_tag(statement),
        log_level: log_level(statement, lookup),
    }
}
