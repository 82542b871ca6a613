//! # Error Types
//!
//! Domain-specific error types for gastrack-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gastrack-core errors (this file)                                      │
//! │  ├── ValidationError  - A scanned/typed value was rejected             │
//! │  └── CoreError        - Config parsing and session failures            │
//! │                                                                         │
//! │  gastrack-db errors (separate crate)                                   │
//! │  └── DbError          - Local cache failures                           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → UI message                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A bad organization regex is NOT an error here. It becomes a
//! [`PatternWarning`](crate::validation::PatternWarning) and validation
//! falls back to the generic rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Fallback text when an organization pattern has no description.
pub const DEFAULT_PATTERN_HINT: &str = "matches organization pattern";

// =============================================================================
// Field Kind
// =============================================================================

/// Which input a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Barcode,
    OrderNumber,
}

impl FieldKind {
    /// Label used at the start of a sentence ("Barcode", "Order number").
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Barcode => "Barcode",
            FieldKind::OrderNumber => "Order number",
        }
    }

    /// Short label used inside the pattern-mismatch message.
    pub fn format_label(&self) -> &'static str {
        match self {
            FieldKind::Barcode => "barcode",
            FieldKind::OrderNumber => "order",
        }
    }

    /// Human-readable description of the generic character set.
    pub fn charset_hint(&self) -> &'static str {
        match self {
            FieldKind::Barcode => "letters, numbers, and basic symbols",
            FieldKind::OrderNumber => "letters, numbers, hyphens, and underscores",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Why a barcode or order number was rejected.
///
/// Every variant is recoverable: the caller shows the message inline and
/// lets the user rescan or retype.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Blank after trimming.
    #[error("{field} cannot be empty")]
    Empty { field: FieldKind },

    /// The organization pattern compiled but did not match.
    ///
    /// ## User Workflow
    /// ```text
    /// Org pattern: ^[0-9]{6}$  ("6-digit cylinder number")
    ///      │
    /// Scan "12345"
    ///      │
    ///      ▼
    /// PatternMismatch ──► "Invalid barcode format. Expected: 6-digit cylinder number"
    /// ```
    #[error(
        "Invalid {} format. Expected: {}",
        .field.format_label(),
        .description.as_deref().unwrap_or(DEFAULT_PATTERN_HINT)
    )]
    PatternMismatch {
        field: FieldKind,
        description: Option<String>,
        examples: Vec<String>,
    },

    /// The generic fallback charset rejected the value.
    #[error(
        "{field} contains invalid characters. Only {} are allowed.",
        .field.charset_hint()
    )]
    CharsetViolation { field: FieldKind },

    /// Barcode shorter than the minimum length.
    #[error("{field} too short (minimum {min} characters)")]
    TooShort { field: FieldKind, min: usize },

    /// Barcode longer than the maximum length.
    #[error("{field} too long (maximum {max} characters)")]
    TooLong { field: FieldKind, max: usize },
}

impl ValidationError {
    /// The input this error belongs to.
    pub fn field(&self) -> FieldKind {
        match self {
            ValidationError::Empty { field }
            | ValidationError::PatternMismatch { field, .. }
            | ValidationError::CharsetViolation { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. } => *field,
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors from config parsing and session operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A value failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Organization format config JSON could not be parsed.
    #[error("Invalid organization format config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// `proceed()` was called before the session was ready.
    #[error("Scan session is not ready: {missing}")]
    SessionNotReady { missing: String },

    /// A customer ID was not present in the supplied list.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
