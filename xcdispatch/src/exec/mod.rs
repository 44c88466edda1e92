// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Utility statement execution
//!
//! Gating, local execution with sub-statement expansion, and the hand-off to
//! routing and transaction control.

pub mod completion;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod interceptor;

// Re-export the main types for convenience
pub use completion::{CompletionTag, COMPLETION_TAG_BUFSIZE};
pub use context::ExecutionContext;
pub use dispatcher::{Collaborators, UtilityCall, UtilityDispatcher};
pub use error::{UtilityError, UtilityResult};
pub use handlers::{CommandHandlers, HandlerOutcome, NoneSink, RelationId, ResultSink, VecSink};
pub use interceptor::{StandardInterceptor, UtilityInterceptor};
