// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Bounded completion tag buffer

/// Size of a client status buffer, terminator included
pub const COMPLETION_TAG_BUFSIZE: usize = 64;

/// Completion status override written by the dispatcher.
///
/// Left empty for the default completion, otherwise written once. Values longer
/// than the buffer are truncated on a character boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionTag {
    value: String,
    written: bool,
}

impl CompletionTag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.written = false;
    }

    /// Write the status override. Later writes within the same dispatch are
    /// ignored.
    pub fn set(&mut self, value: &str) {
        if self.written {
            log::warn!(
                "Completion tag already set to '{}', ignoring '{}'",
                self.value,
                value
            );
            return;
        }
        self.value = truncate_to_boundary(value, COMPLETION_TAG_BUFSIZE - 1).to_string();
        self.written = true;
    }

    /// Write "<tag> <count>"
    pub fn set_count(&mut self, tag: &str, count: u64) {
        self.set(&format!("{} {}", tag, count));
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_set(&self) -> bool {
        self.written
    }
}

impl std::fmt::Display for CompletionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

fn truncate_to_boundary(value: &str, max_len: usize) -> &str {
    if value.len() <= max_len {
        return value;
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}
