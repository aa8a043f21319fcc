//! Error types for the automation registry

use thiserror::Error;

use crate::model::AutomationId;

/// Automation registry error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomationError {
    /// No rule with this id exists
    #[error("automation not found: {0}")]
    NotFound(AutomationId),
}

/// Result type for registry operations
pub type AutomationResult<T> = Result<T, AutomationError>;
