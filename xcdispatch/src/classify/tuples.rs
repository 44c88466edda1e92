// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result-shape and strict read-only predicates

use super::SessionObjectLookup;
use crate::ast::{QueryCommand, Statement};

/// Whether dispatching this statement sends rows to the destination
pub fn utility_returns_tuples(statement: &Statement, lookup: &dyn SessionObjectLookup) -> bool {
    match statement {
        Statement::Fetch(fetch) => {
            if fetch.is_move {
                return false;
            }
            // An unknown portal is reported by the FETCH itself
            lookup.portal_returns_tuples(&fetch.portal).unwrap_or(false)
        }
        Statement::Execute(execute) => {
            if execute.into.is_some() {
                return false;
            }
            lookup
                .prepared_statement(&execute.name)
                .map(|prepared| prepared.returns_tuples)
                .unwrap_or(false)
        }
        Statement::Explain(_) | Statement::VariableShow { .. } => true,
        _ => false,
    }
}

/// Strict read-only test: the statement must in truth modify nothing.
///
/// Stricter than the read-only transaction gate. Every utility statement is
/// treated as read/write.
pub fn command_is_read_only(statement: &Statement) -> bool {
    match statement {
        Statement::Query(query) => match query.command {
            QueryCommand::Select => {
                query.into.is_none() && query.row_marks.is_empty() && !query.has_modifying_cte
            }
            QueryCommand::Insert | QueryCommand::Update | QueryCommand::Delete => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{QueryStatement, RowMarkKind};

    #[test]
    fn test_command_is_read_only() {
        let mut query = QueryStatement::select();
        assert!(command_is_read_only(&Statement::Query(query.clone())));

        query.has_modifying_cte = true;
        assert!(!command_is_read_only(&Statement::Query(query.clone())));

        query.has_modifying_cte = false;
        query.row_marks.push(RowMarkKind::Exclusive);
        assert!(!command_is_read_only(&Statement::Query(query)));

        assert!(!command_is_read_only(&Statement::Checkpoint));
    }
}
