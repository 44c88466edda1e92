// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Pluggable interception of utility dispatch

use super::dispatcher::{UtilityCall, UtilityDispatcher};
use super::error::UtilityResult;

/// Strategy wrapped around every dispatch, sub-statements included.
///
/// The default runs the standard processing. Implementations typically do
/// their own work and then delegate.
pub trait UtilityInterceptor: Send + Sync {
    fn process_utility(
        &self,
        dispatcher: &UtilityDispatcher,
        call: UtilityCall<'_>,
    ) -> UtilityResult<()> {
        dispatcher.standard_process_utility(call)
    }
}

/// Interceptor that only runs the standard processing
pub struct StandardInterceptor;

impl UtilityInterceptor for StandardInterceptor {}
