//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::PayrollEngine;

/// Shared application state.
///
/// Contains the payroll engine shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<PayrollEngine>,
}

impl AppState {
    /// Creates a new application state owning the given engine.
    pub fn new(engine: PayrollEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the payroll engine.
    pub fn engine(&self) -> &PayrollEngine {
        &self.engine
    }
}
