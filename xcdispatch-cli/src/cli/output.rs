// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for CLI output

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use serde::Serialize;

use super::commands::OutputFormat;

/// One row of `classify` output
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedStatement {
    pub index: usize,
    pub text: String,
    pub kind: String,
    pub tag: String,
    pub log_level: String,
    pub targets: String,
}

/// Outcome of one statement under `simulate`
#[derive(Debug, Clone, Serialize)]
pub struct SimulatedStatement {
    pub index: usize,
    pub text: String,
    /// Completion tag when the statement succeeded
    pub tag: Option<String>,
    /// SQLSTATE and message when it failed
    pub error: Option<(String, String)>,
    pub rows: Vec<Vec<serde_json::Value>>,
    /// Collaborator calls, in order
    pub events: Vec<String>,
}

/// Result formatter for different output formats
pub struct ResultFormatter;

impl ResultFormatter {
    pub fn format_classified(rows: &[ClassifiedStatement], format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => Self::classified_table(rows),
            OutputFormat::Json => Self::to_json(rows),
        }
    }

    pub fn format_simulated(results: &[SimulatedStatement], format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => Self::simulated_table(results),
            OutputFormat::Json => Self::to_json(results),
        }
    }

    fn classified_table(rows: &[ClassifiedStatement]) -> String {
        if rows.is_empty() {
            return format!("{}\n", "No statements found".yellow());
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(
            ["#", "Statement", "Kind", "Tag", "Log level", "Targets"]
                .iter()
                .map(|col| Cell::new(col).fg(Color::Green))
                .collect::<Vec<Cell>>(),
        );

        for row in rows {
            let targets = if row.targets.starts_with("error") {
                Cell::new(&row.targets).fg(Color::Red)
            } else {
                Cell::new(&row.targets)
            };
            table.add_row(vec![
                Cell::new(row.index),
                Cell::new(&row.text),
                Cell::new(&row.kind),
                Cell::new(&row.tag),
                Cell::new(&row.log_level),
                targets,
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!("{}\n", "Classification".bold().green()));
        output.push_str(&format!("Statements: {}\n\n", rows.len()));
        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    fn simulated_table(results: &[SimulatedStatement]) -> String {
        if results.is_empty() {
            return format!("{}\n", "No statements found".yellow());
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(
            ["#", "Statement", "Result", "Cluster calls"]
                .iter()
                .map(|col| Cell::new(col).fg(Color::Green))
                .collect::<Vec<Cell>>(),
        );

        for result in results {
            let outcome = match (&result.tag, &result.error) {
                (_, Some((sqlstate, message))) => {
                    Cell::new(format!("ERROR {}: {}", sqlstate, message)).fg(Color::Red)
                }
                (Some(tag), None) if !tag.is_empty() => Cell::new(tag),
                _ => Cell::new("OK"),
            };
            let mut calls = result.events.join("\n");
            if !result.rows.is_empty() {
                if !calls.is_empty() {
                    calls.push('\n');
                }
                calls.push_str(&format!("{} row(s) returned", result.rows.len()));
            }
            table.add_row(vec![
                Cell::new(result.index),
                Cell::new(&result.text),
                outcome,
                Cell::new(calls),
            ]);
        }

        let failed = results.iter().filter(|r| r.error.is_some()).count();
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Simulation".bold().green()));
        output.push_str(&format!("Statements: {}\n\n", results.len()));
        output.push_str(&table.to_string());
        output.push('\n');
        if failed > 0 {
            output.push_str(&format!(
                "\n{}\n",
                format!("{} statement(s) failed", failed).bold().yellow()
            ));
        }
        output
    }

    fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
        let mut json = serde_json::to_string_pretty(value).unwrap_or_else(|_| {
            "{\"status\": \"error\", \"error\": \"Could not serialize results to JSON\"}"
                .to_string()
        });
        json.push('\n');
        json
    }
}
