//! # Validation Module
//!
//! Decides whether a scanned or typed value is an acceptable barcode or
//! order number for an organization.
//!
//! ## Rule Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Steps                                   │
//! │                                                                         │
//! │  raw input                                                              │
//! │     │ trim                                                              │
//! │     ▼                                                                   │
//! │  1. Empty? ──────────────────────────────────────► Empty                │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  2. Org pattern compiled? ── yes ── no match ────► PatternMismatch      │
//! │     │                         │                                         │
//! │     │ no (absent or invalid)  └── match ─────┐                          │
//! │     ▼                                        │                          │
//! │  3. Generic charset ── fail ─────────────────┼──► CharsetViolation      │
//! │     │                                        │                          │
//! │     ▼                                        ▼                          │
//! │  4. Length 3..=50 (barcode only) ─── fail ───────► TooShort / TooLong   │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │    Ok                                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The organization pattern is authoritative when it compiles: a value
//! that matches it skips the generic charset check.
//!
//! Organization patterns are ECMAScript sources written for the web admin,
//! so they compile with [`regress`] (lookaround, ASCII-only `\d`/`\w`).
//! The fixed charset rules use [`regex`].
//!
//! ## Usage
//! ```rust
//! use gastrack_core::{CompiledFormats, FormatRule, OrganizationFormatConfig};
//!
//! let config = OrganizationFormatConfig {
//!     barcode_format: Some(FormatRule::with_pattern("^[0-9]{6}$").description("6 digits")),
//!     order_number_format: None,
//! };
//!
//! // Compile once per config change, validate on every scan.
//! let formats = CompiledFormats::compile(&config);
//! assert!(formats.validate_barcode("123456").is_ok());
//! assert!(formats.validate_barcode("12345").is_err());
//! assert!(formats.validate_order_number("SO-991").is_ok());
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::error::{FieldKind, ValidationError};
use crate::types::{FormatRule, OrganizationFormatConfig};
use crate::{MAX_BARCODE_LENGTH, MIN_BARCODE_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

static BARCODE_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-_*%]+$").expect("Invalid barcode charset regex"));

static ORDER_NUMBER_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-_]+$").expect("Invalid order number charset regex"));

// =============================================================================
// Pattern Warning
// =============================================================================

/// An organization pattern that failed to compile.
///
/// Never shown to the scanning user as a validation failure. It is logged
/// and kept on [`CompiledFormats`] so an admin screen can surface it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PatternWarning {
    pub field: FieldKind,
    pub pattern: String,
    pub reason: String,
}

// =============================================================================
// Compiled Formats
// =============================================================================

/// A compiled organization pattern with the rule it came from.
#[derive(Debug, Clone)]
struct CompiledRule {
    regex: regress::Regex,
    description: Option<String>,
    examples: Vec<String>,
}

/// Organization formats compiled once per config change.
///
/// ## Lifecycle
/// ```text
/// Org config loaded/changed ──► CompiledFormats::compile(&config)
///                                     │
///           ┌─────────────────────────┼─────────────────────────┐
///           ▼                         ▼                         ▼
///   validate_barcode(scan)   validate_order_number(typed)   warnings()
///        (every scan)              (every keystroke)        (admin UI)
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompiledFormats {
    barcode: Option<CompiledRule>,
    order_number: Option<CompiledRule>,
    warnings: Vec<PatternWarning>,
}

impl CompiledFormats {
    /// Compiles both organization patterns.
    ///
    /// An invalid pattern is logged, recorded as a [`PatternWarning`], and
    /// treated as absent.
    pub fn compile(config: &OrganizationFormatConfig) -> Self {
        let mut warnings = Vec::new();
        let barcode = compile_rule(FieldKind::Barcode, config.rule(FieldKind::Barcode), &mut warnings);
        let order_number = compile_rule(
            FieldKind::OrderNumber,
            config.rule(FieldKind::OrderNumber),
            &mut warnings,
        );

        CompiledFormats {
            barcode,
            order_number,
            warnings,
        }
    }

    /// Patterns that failed to compile.
    pub fn warnings(&self) -> &[PatternWarning] {
        &self.warnings
    }

    /// Whether an organization pattern is active for the field.
    pub fn has_pattern(&self, field: FieldKind) -> bool {
        self.rule(field).is_some()
    }

    fn rule(&self, field: FieldKind) -> Option<&CompiledRule> {
        match field {
            FieldKind::Barcode => self.barcode.as_ref(),
            FieldKind::OrderNumber => self.order_number.as_ref(),
        }
    }

    /// Validates a barcode.
    ///
    /// ## Rules
    /// - Must not be blank
    /// - Must match the organization pattern if one compiled,
    ///   otherwise only `A-Z a-z 0-9 - _ * %`
    /// - Must be between 3 and 50 characters
    pub fn validate_barcode(&self, raw: &str) -> ValidationResult<()> {
        let value = self.check_format(FieldKind::Barcode, raw, &BARCODE_CHARSET)?;

        let len = value.chars().count();
        if len < MIN_BARCODE_LENGTH {
            return Err(ValidationError::TooShort {
                field: FieldKind::Barcode,
                min: MIN_BARCODE_LENGTH,
            });
        }
        if len > MAX_BARCODE_LENGTH {
            return Err(ValidationError::TooLong {
                field: FieldKind::Barcode,
                max: MAX_BARCODE_LENGTH,
            });
        }

        Ok(())
    }

    /// Validates an order number.
    ///
    /// ## Rules
    /// - Must not be blank
    /// - Must match the organization pattern if one compiled,
    ///   otherwise only `A-Z a-z 0-9 - _`
    /// - No length bounds
    pub fn validate_order_number(&self, raw: &str) -> ValidationResult<()> {
        self.check_format(FieldKind::OrderNumber, raw, &ORDER_NUMBER_CHARSET)?;
        Ok(())
    }

    /// Validates a value for either field.
    pub fn validate(&self, field: FieldKind, raw: &str) -> ValidationResult<()> {
        match field {
            FieldKind::Barcode => self.validate_barcode(raw),
            FieldKind::OrderNumber => self.validate_order_number(raw),
        }
    }

    /// Steps 1-3 shared by both fields. Returns the trimmed value.
    fn check_format<'a>(
        &self,
        field: FieldKind,
        raw: &'a str,
        charset: &Regex,
    ) -> ValidationResult<&'a str> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        match self.rule(field) {
            Some(rule) => {
                if rule.regex.find(value).is_none() {
                    return Err(ValidationError::PatternMismatch {
                        field,
                        description: rule.description.clone(),
                        examples: rule.examples.clone(),
                    });
                }
            }
            None => {
                if !charset.is_match(value) {
                    return Err(ValidationError::CharsetViolation { field });
                }
            }
        }

        Ok(value)
    }
}

fn compile_rule(
    field: FieldKind,
    rule: Option<&FormatRule>,
    warnings: &mut Vec<PatternWarning>,
) -> Option<CompiledRule> {
    let rule = rule?;
    let pattern = rule.pattern_source()?;

    match regress::Regex::new(pattern) {
        Ok(regex) => Some(CompiledRule {
            regex,
            description: rule.description.clone(),
            examples: rule.examples.clone(),
        }),
        Err(err) => {
            warn!(
                field = %field,
                pattern = %pattern,
                error = %err,
                "Invalid organization pattern, falling back to generic rules"
            );
            warnings.push(PatternWarning {
                field,
                pattern: pattern.to_string(),
                reason: err.to_string(),
            });
            None
        }
    }
}

// =============================================================================
// One-shot Validators
// =============================================================================

/// Validates a barcode against an organization config.
///
/// Compiles the config on every call; prefer [`CompiledFormats`] on hot
/// paths.
///
/// ## Example
/// ```rust
/// use gastrack_core::{validate_barcode, OrganizationFormatConfig};
///
/// let config = OrganizationFormatConfig::default();
/// assert!(validate_barcode("CYL-001", &config).is_ok());
/// assert!(validate_barcode("  ", &config).is_err());
/// assert!(validate_barcode("AB", &config).is_err());
/// ```
pub fn validate_barcode(raw: &str, config: &OrganizationFormatConfig) -> ValidationResult<()> {
    CompiledFormats::compile(config).validate_barcode(raw)
}

/// Validates an order number against an organization config.
///
/// ## Example
/// ```rust
/// use gastrack_core::{validate_order_number, OrganizationFormatConfig};
///
/// let config = OrganizationFormatConfig::default();
/// assert!(validate_order_number("SO_1", &config).is_ok());
/// assert!(validate_order_number("SO#1", &config).is_err());
/// ```
pub fn validate_order_number(raw: &str, config: &OrganizationFormatConfig) -> ValidationResult<()> {
    CompiledFormats::compile(config).validate_order_number(raw)
}

// =============================================================================
// Validation Outcome
// =============================================================================

/// Serializable `{ isValid, error }` view of a validation result for UI
/// consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        ValidationOutcome {
            is_valid: true,
            error: None,
        }
    }
}

impl From<&ValidationResult<()>> for ValidationOutcome {
    fn from(result: &ValidationResult<()>) -> Self {
        match result {
            Ok(()) => ValidationOutcome::valid(),
            Err(err) => ValidationOutcome {
                is_valid: false,
                error: Some(err.to_string()),
            },
        }
    }
}

impl From<ValidationResult<()>> for ValidationOutcome {
    fn from(result: ValidationResult<()>) -> Self {
        ValidationOutcome::from(&result)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn barcode_config(pattern: &str, description: Option<&str>) -> OrganizationFormatConfig {
        let mut rule = FormatRule::with_pattern(pattern);
        rule.description = description.map(str::to_string);
        OrganizationFormatConfig {
            barcode_format: Some(rule),
            order_number_format: None,
        }
    }

    #[test]
    fn test_blank_input_is_empty_error() {
        let config = OrganizationFormatConfig::default();
        for raw in ["", " ", "\t\n  "] {
            assert_eq!(
                validate_barcode(raw, &config),
                Err(ValidationError::Empty {
                    field: FieldKind::Barcode
                })
            );
            assert_eq!(
                validate_order_number(raw, &config),
                Err(ValidationError::Empty {
                    field: FieldKind::OrderNumber
                })
            );
        }
    }

    #[test]
    fn test_generic_barcode_rules() {
        let config = OrganizationFormatConfig::default();

        assert!(validate_barcode("ABC", &config).is_ok());
        assert!(validate_barcode("cyl-0001_*%", &config).is_ok());
        assert!(validate_barcode("  CYL001  ", &config).is_ok());
        assert!(validate_barcode(&"9".repeat(50), &config).is_ok());

        assert_eq!(
            validate_barcode("has space", &config),
            Err(ValidationError::CharsetViolation {
                field: FieldKind::Barcode
            })
        );
        assert_eq!(
            validate_barcode("AB", &config),
            Err(ValidationError::TooShort {
                field: FieldKind::Barcode,
                min: 3
            })
        );
        assert_eq!(
            validate_barcode(&"9".repeat(51), &config),
            Err(ValidationError::TooLong {
                field: FieldKind::Barcode,
                max: 50
            })
        );
    }

    #[test]
    fn test_generic_order_number_rules() {
        let config = OrganizationFormatConfig::default();

        assert!(validate_order_number("A", &config).is_ok());
        assert!(validate_order_number("SO-2024_001", &config).is_ok());
        assert!(validate_order_number(&"7".repeat(200), &config).is_ok());

        for raw in ["SO*1", "SO%1", "SO 1"] {
            assert_eq!(
                validate_order_number(raw, &config),
                Err(ValidationError::CharsetViolation {
                    field: FieldKind::OrderNumber
                })
            );
        }
    }

    #[test]
    fn test_org_pattern_match_and_mismatch() {
        let config = barcode_config("^[0-9]{6}$", Some("6-digit cylinder number"));

        assert!(validate_barcode("123456", &config).is_ok());

        let err = validate_barcode("12345", &config).unwrap_err();
        assert!(matches!(err, ValidationError::PatternMismatch { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid barcode format. Expected: 6-digit cylinder number"
        );
    }

    #[test]
    fn test_org_pattern_is_authoritative_over_charset() {
        // '#' is outside the generic charset but the org pattern allows it.
        let config = barcode_config(r"^#\d{4}$", None);
        assert!(validate_barcode("#1234", &config).is_ok());

        let err = validate_barcode("1234", &config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid barcode format. Expected: matches organization pattern"
        );
    }

    #[test]
    fn test_org_pattern_still_length_checked() {
        let config = barcode_config("^[A-Z]+$", None);
        assert_eq!(
            validate_barcode("AB", &config),
            Err(ValidationError::TooShort {
                field: FieldKind::Barcode,
                min: 3
            })
        );
    }

    #[test]
    fn test_org_pattern_is_unanchored_search() {
        let config = barcode_config("CYL", None);
        assert!(validate_barcode("XX-CYL-01", &config).is_ok());
    }

    #[test]
    fn test_org_pattern_supports_lookahead() {
        let config = barcode_config(r"^(?!TEST)[A-Z0-9]{6}$", Some("6 characters, not a test tag"));
        let formats = CompiledFormats::compile(&config);

        assert!(formats.has_pattern(FieldKind::Barcode));
        assert!(formats.warnings().is_empty());
        assert!(formats.validate_barcode("CYL001").is_ok());
        assert!(matches!(
            formats.validate_barcode("TEST01"),
            Err(ValidationError::PatternMismatch { .. })
        ));
    }

    #[test]
    fn test_org_pattern_digit_class_is_ascii_only() {
        let config = barcode_config(r"^\d{6}$", None);

        assert!(validate_barcode("123456", &config).is_ok());
        // Arabic-Indic digits
        assert!(matches!(
            validate_barcode("\u{661}\u{662}\u{663}\u{664}\u{665}\u{666}", &config),
            Err(ValidationError::PatternMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_generic_rules() {
        let config = barcode_config("(unclosed", Some("never used"));
        let formats = CompiledFormats::compile(&config);

        assert!(!formats.has_pattern(FieldKind::Barcode));
        assert_eq!(formats.warnings().len(), 1);
        assert_eq!(formats.warnings()[0].field, FieldKind::Barcode);
        assert_eq!(formats.warnings()[0].pattern, "(unclosed");

        assert!(formats.validate_barcode("ABC123").is_ok());
        assert!(matches!(
            formats.validate_barcode("ABC 123"),
            Err(ValidationError::CharsetViolation { .. })
        ));
    }

    #[test]
    fn test_order_number_pattern() {
        let config = OrganizationFormatConfig {
            barcode_format: None,
            order_number_format: Some(
                FormatRule::with_pattern(r"^SO-\d{5}$")
                    .description("SO-12345")
                    .examples(["SO-00001", "SO-00002"]),
            ),
        };
        let formats = CompiledFormats::compile(&config);

        assert!(formats.validate_order_number("SO-12345").is_ok());
        assert!(formats.validate_barcode("CYL001").is_ok());

        match formats.validate_order_number("12345") {
            Err(ValidationError::PatternMismatch {
                field,
                description,
                examples,
            }) => {
                assert_eq!(field, FieldKind::OrderNumber);
                assert_eq!(description.as_deref(), Some("SO-12345"));
                assert_eq!(examples, vec!["SO-00001", "SO-00002"]);
            }
            other => panic!("expected pattern mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_picks_rule_per_field() {
        let config = OrganizationFormatConfig {
            barcode_format: None,
            order_number_format: Some(FormatRule::with_pattern("^SO-")),
        };
        let formats = CompiledFormats::compile(&config);
        assert!(!formats.has_pattern(FieldKind::Barcode));
        assert!(formats.has_pattern(FieldKind::OrderNumber));
    }

    #[test]
    fn test_blank_pattern_is_absent() {
        let config = barcode_config("", None);
        let formats = CompiledFormats::compile(&config);
        assert!(!formats.has_pattern(FieldKind::Barcode));
        assert!(formats.warnings().is_empty());
    }

    #[test]
    fn test_validate_dispatch() {
        let formats = CompiledFormats::default();
        assert!(formats.validate(FieldKind::Barcode, "AB").is_err());
        assert!(formats.validate(FieldKind::OrderNumber, "AB").is_ok());
    }

    #[test]
    fn test_validation_outcome() {
        let config = OrganizationFormatConfig::default();

        let outcome = ValidationOutcome::from(validate_barcode("CYL001", &config));
        assert_eq!(outcome, ValidationOutcome::valid());
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"isValid":true}"#
        );

        let outcome = ValidationOutcome::from(validate_barcode("", &config));
        assert!(!outcome.is_valid);
        assert_eq!(outcome.error.as_deref(), Some("Barcode cannot be empty"));
    }
}
