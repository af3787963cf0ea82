//! Common error infrastructure for forge-core.
//!
//! This module provides shared types and traits used across all error types in
//! the crate. Domain-specific errors (`BuildError`, `ProgressionError`,
//! `CatalogError`) are defined in their respective modules alongside the
//! operations they validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each operation family has its own error type
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **All-or-Nothing**: An error from a command means no state was mutated

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: Constraint violations; the caller retries with different
///   input (different target, fewer spares, a completed configuration)
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Corrupt reference data; the engine is entitled to assume this
///   does not happen and only tests assert it defensively
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry with the same command and different input.
    ///
    /// Examples: tag conflict on the chosen die, spare pool exhausted
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown base id, choice outside the allowed set
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - reference data corrupted, cannot continue.
    ///
    /// Examples: a required catalog was never injected
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all forge-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
