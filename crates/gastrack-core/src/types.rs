//! # Domain Types
//!
//! Plain data the scanning workflow receives from its collaborators.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────────┐   ┌─────────────────┐                    │
//! │  │ OrganizationFormatConfig │   │ CustomerRecord  │                    │
//! │  │  ──────────────────────  │   │  ─────────────  │                    │
//! │  │  barcodeFormat?  ──┐     │   │  id (unique)    │                    │
//! │  │  orderNumberFormat?┤     │   │  name           │                    │
//! │  └────────────────────┼─────┘   │  barcode?       │                    │
//! │                       ▼         └─────────────────┘                    │
//! │              ┌─────────────────┐                                        │
//! │              │   FormatRule    │   ┌─────────────────┐                 │
//! │              │  pattern?       │   │   ScanEvent     │                 │
//! │              │  description?   │   │  type (ignored) │                 │
//! │              │  examples[]     │   │  data           │                 │
//! │              └─────────────────┘   └─────────────────┘                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire names follow the hosted backend (camelCase, `CustomerListID`).

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, FieldKind};

// =============================================================================
// Format Rule
// =============================================================================

/// An organization-specific format for one kind of identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FormatRule {
    /// Regex source. May be invalid; see `CompiledFormats`.
    #[serde(default)]
    pub pattern: Option<String>,

    /// Human-readable format, e.g. "6-digit cylinder number".
    #[serde(default)]
    pub description: Option<String>,

    /// Sample values shown under the input.
    #[serde(default)]
    pub examples: Vec<String>,
}

impl FormatRule {
    /// Creates a rule with only a pattern.
    pub fn with_pattern(pattern: impl Into<String>) -> Self {
        FormatRule {
            pattern: Some(pattern.into()),
            ..FormatRule::default()
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the examples.
    pub fn examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = examples.into_iter().map(Into::into).collect();
        self
    }

    /// Pattern source, if non-blank.
    pub fn pattern_source(&self) -> Option<&str> {
        self.pattern.as_deref().filter(|p| !p.is_empty())
    }

    /// Helper line shown under the input: the first two examples.
    ///
    /// ## Example
    /// ```rust
    /// use gastrack_core::FormatRule;
    ///
    /// let rule = FormatRule::default().examples(["CYL001", "CYL002", "CYL003"]);
    /// assert_eq!(rule.examples_hint().as_deref(), Some("CYL001, CYL002"));
    /// ```
    pub fn examples_hint(&self) -> Option<String> {
        if self.examples.is_empty() {
            return None;
        }
        Some(
            self.examples
                .iter()
                .take(2)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// Input placeholder text, if the organization described its format.
    pub fn placeholder(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

// =============================================================================
// Organization Format Config
// =============================================================================

/// Per-organization identifier formats.
///
/// Either rule may be missing, in which case the generic rules apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationFormatConfig {
    #[serde(default)]
    pub barcode_format: Option<FormatRule>,

    #[serde(default)]
    pub order_number_format: Option<FormatRule>,
}

impl OrganizationFormatConfig {
    /// Parses the JSON stored on the organization row.
    ///
    /// ## Example
    /// ```rust
    /// use gastrack_core::OrganizationFormatConfig;
    ///
    /// let config = OrganizationFormatConfig::from_json(
    ///     r#"{"barcodeFormat":{"pattern":"^[0-9]{6}$","description":"6 digits"}}"#,
    /// ).unwrap();
    /// assert!(config.order_number_format.is_none());
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes back to the stored JSON shape.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns the rule for the given field.
    pub fn rule(&self, field: FieldKind) -> Option<&FormatRule> {
        match field {
            FieldKind::Barcode => self.barcode_format.as_ref(),
            FieldKind::OrderNumber => self.order_number_format.as_ref(),
        }
    }
}

// =============================================================================
// Customer Record
// =============================================================================

/// The subset of a customer row the matcher needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerRecord {
    /// Unique customer ID (the backend's `CustomerListID`).
    #[serde(alias = "CustomerListID")]
    pub id: String,

    /// Display name. The backend column is nullable; `null` reads as `""`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,

    #[serde(default)]
    pub barcode: Option<String>,
}

impl CustomerRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, barcode: Option<&str>) -> Self {
        CustomerRecord {
            id: id.into(),
            name: name.into(),
            barcode: barcode.map(str::to_string),
        }
    }

    /// Trimmed barcode, treating blank as missing.
    pub fn trimmed_barcode(&self) -> Option<&str> {
        self.barcode
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Scan Types
// =============================================================================

/// Which input a camera read is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ScanTarget {
    Customer,
    Order,
}

impl ScanTarget {
    /// The validation rule applied to reads for this target.
    pub fn field(&self) -> FieldKind {
        match self {
            ScanTarget::Customer => FieldKind::Barcode,
            ScanTarget::Order => FieldKind::OrderNumber,
        }
    }
}

/// A decoded read from the camera.
///
/// `symbology` is the camera's `type` (e.g. "code128") and is not used by
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScanEvent {
    #[serde(rename = "type", default)]
    pub symbology: String,

    pub data: String,
}

impl ScanEvent {
    pub fn new(symbology: impl Into<String>, data: impl Into<String>) -> Self {
        ScanEvent {
            symbology: symbology.into(),
            data: data.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_partial_json() {
        let config = OrganizationFormatConfig::from_json("{}").unwrap();
        assert_eq!(config, OrganizationFormatConfig::default());

        let config = OrganizationFormatConfig::from_json(
            r#"{"orderNumberFormat":{"pattern":"^SO-\\d+$","examples":["SO-1","SO-22"]}}"#,
        )
        .unwrap();
        let rule = config.order_number_format.unwrap();
        assert_eq!(rule.pattern_source(), Some(r"^SO-\d+$"));
        assert!(rule.description.is_none());
        assert_eq!(rule.examples.len(), 2);
    }

    #[test]
    fn test_config_from_malformed_json() {
        let err = OrganizationFormatConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, crate::CoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_config_json_keys_are_camel_case() {
        let config = OrganizationFormatConfig {
            barcode_format: Some(FormatRule::with_pattern("^A")),
            order_number_format: None,
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"barcodeFormat\""));
        assert!(json.contains("\"orderNumberFormat\""));
    }

    #[test]
    fn test_rule_helpers() {
        let rule = FormatRule::with_pattern("").description("6 digits");
        assert_eq!(rule.pattern_source(), None);
        assert_eq!(rule.placeholder(), Some("6 digits"));
        assert_eq!(rule.examples_hint(), None);

        let rule = rule.examples(["123456"]);
        assert_eq!(rule.examples_hint().as_deref(), Some("123456"));
    }

    #[test]
    fn test_customer_accepts_backend_column_name() {
        let customer: CustomerRecord = serde_json::from_str(
            r#"{"CustomerListID":"80000A1","name":"Acme","barcode":" ACME1 "}"#,
        )
        .unwrap();
        assert_eq!(customer.id, "80000A1");
        assert_eq!(customer.trimmed_barcode(), Some("ACME1"));

        let customer: CustomerRecord =
            serde_json::from_str(r#"{"id":"2","name":"Bay Gas","barcode":"   "}"#).unwrap();
        assert_eq!(customer.trimmed_barcode(), None);
    }

    #[test]
    fn test_customer_list_tolerates_null_name() {
        let customers: Vec<CustomerRecord> = serde_json::from_str(
            r#"[{"CustomerListID":"1","name":"Acme"},{"CustomerListID":"2","name":null,"barcode":"X1"},{"CustomerListID":"3"}]"#,
        )
        .unwrap();
        assert_eq!(customers.len(), 3);
        assert_eq!(customers[0].name, "Acme");
        assert_eq!(customers[1].name, "");
        assert_eq!(customers[1].barcode.as_deref(), Some("X1"));
        assert_eq!(customers[2].name, "");
        assert_eq!(customers[2].barcode, None);
    }

    #[test]
    fn test_scan_event_reads_type_field() {
        let event: ScanEvent =
            serde_json::from_str(r#"{"type":"code128","data":"CYL-001"}"#).unwrap();
        assert_eq!(event.symbology, "code128");
        assert_eq!(event.data, "CYL-001");
    }

    #[test]
    fn test_scan_target_field() {
        assert_eq!(ScanTarget::Customer.field(), FieldKind::Barcode);
        assert_eq!(ScanTarget::Order.field(), FieldKind::OrderNumber);
    }
}
