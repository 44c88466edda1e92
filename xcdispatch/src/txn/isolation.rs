// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transaction isolation levels and BEGIN option re-encoding
//!
//! Options given on BEGIN / START TRANSACTION are applied locally as-is. Only the
//! subset that changes remote behavior (isolation level and access mode) is
//! rebuilt into the begin query that participants receive.

use crate::ast::TransactionOption;
use serde::{Deserialize, Serialize};

/// Transaction isolation levels as defined in SQL standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IsolationLevel {
    ReadUncommitted,
    #[default]
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl IsolationLevel {
    /// Get string representation for display
    pub fn as_str(&self) -> &'static str {
        match self {
            IsolationLevel::ReadUncommitted => "READ UNCOMMITTED",
            IsolationLevel::ReadCommitted => "READ COMMITTED",
            IsolationLevel::RepeatableRead => "REPEATABLE READ",
            IsolationLevel::Serializable => "SERIALIZABLE",
        }
    }
}

impl std::fmt::Display for IsolationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for IsolationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "READ UNCOMMITTED" | "READ_UNCOMMITTED" => Ok(IsolationLevel::ReadUncommitted),
            "READ COMMITTED" | "READ_COMMITTED" => Ok(IsolationLevel::ReadCommitted),
            "REPEATABLE READ" | "REPEATABLE_READ" => Ok(IsolationLevel::RepeatableRead),
            "SERIALIZABLE" => Ok(IsolationLevel::Serializable),
            _ => Err(format!("Unknown isolation level: {}", s)),
        }
    }
}

/// Build the begin query sent to participants from the BEGIN options.
///
/// Deferrable is never forwarded. Returns `None` when no option affects
/// remote nodes, in which case participants start with a plain BEGIN.
pub fn rewrite_begin_query(options: &[TransactionOption]) -> Option<String> {
    let clauses: Vec<String> = options
        .iter()
        .filter_map(|option| match option {
            TransactionOption::IsolationLevel(level) => {
                Some(format!("ISOLATION LEVEL {}", level.as_str()))
            }
            TransactionOption::ReadOnly(true) => Some("READ ONLY".to_string()),
            TransactionOption::ReadOnly(false) => Some("READ WRITE".to_string()),
            TransactionOption::Deferrable(_) => None,
        })
        .collect();

    if clauses.is_empty() {
        None
    } else {
        Some(format!("START TRANSACTION {}", clauses.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isolation_level_round_trip_names() {
        assert_eq!(
            "serializable".parse::<IsolationLevel>().unwrap(),
            IsolationLevel::Serializable
        );
        assert_eq!(
            "REPEATABLE_READ".parse::<IsolationLevel>().unwrap(),
            IsolationLevel::RepeatableRead
        );
        assert!("snapshot".parse::<IsolationLevel>().is_err());
        assert_eq!(IsolationLevel::default(), IsolationLevel::ReadCommitted);
    }

    #[test]
    fn test_rewrite_begin_query_keeps_remote_options_only() {
        let options = vec![
            TransactionOption::IsolationLevel(IsolationLevel::Serializable),
            TransactionOption::Deferrable(true),
            TransactionOption::ReadOnly(true),
        ];
        assert_eq!(
            rewrite_begin_query(&options).as_deref(),
            Some("START TRANSACTION ISOLATION LEVEL SERIALIZABLE, READ ONLY")
        );
    }

    #[test]
    fn test_rewrite_begin_query_without_remote_options() {
        assert_eq!(rewrite_begin_query(&[]), None);
        assert_eq!(
            rewrite_begin_query(&[TransactionOption::Deferrable(false)]),
            None
        );
        assert_eq!(
            rewrite_begin_query(&[TransactionOption::ReadOnly(false)]).as_deref(),
            Some("START TRANSACTION READ WRITE")
        );
    }
}
