// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement scripts
//!
//! A script is either a bare array of entries or an object that also seeds
//! the catalog:
//!
//! ```json
//! {
//!   "relations": { "orders": "Table", "recent": "View" },
//!   "statements": [
//!     { "text": "VACUUM orders", "statement": { "Vacuum": { "vacuum": true, "relation": { "name": "orders" } } } }
//!   ]
//! }
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use xcdispatch::routing::RelationKind;
use xcdispatch::Statement;

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptEntry {
    /// Source text, forwarded verbatim to remote nodes
    pub text: String,
    pub statement: Statement,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub relations: BTreeMap<String, RelationKind>,
    pub statements: Vec<ScriptEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptFile {
    Full(Script),
    Statements(Vec<ScriptEntry>),
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read script {:?}: {}", path, e))?;
        let script = Self::parse(&content)
            .map_err(|e| format!("Failed to parse script {:?}: {}", path, e))?;
        log::debug!(
            "Loaded {} statement(s) and {} relation(s) from {:?}",
            script.statements.len(),
            script.relations.len(),
            path
        );
        Ok(script)
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        Ok(match serde_json::from_str::<ScriptFile>(content)? {
            ScriptFile::Full(script) => script,
            ScriptFile::Statements(statements) => Script {
                relations: BTreeMap::new(),
                statements,
            },
        })
    }
}
