//! # gastrack-core: Pure Scanning Logic for GasTrack
//!
//! This crate holds the logic the mobile scanning screen runs on every scan
//! and keystroke. Everything here is a pure function or an in-memory state
//! machine; customers and organization configs are passed in by the caller.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       GasTrack Scan Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Mobile Scan Screen (camera + inputs)            │   │
//! │  │   Customer input ──► Order input ──► Continue                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain values                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ gastrack-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │validation │  │ matching  │  │  session  │  │   │
//! │  │   │ Customer  │  │ barcode   │  │ buckets   │  │ re-arm    │  │   │
//! │  │   │ FormatCfg │  │ order no. │  │ dedupe    │  │ readiness │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │        gastrack-db (local cache) / hosted backend               │   │
//! │  │        customer snapshots, organization format configs          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Customer records, organization format config, scan events
//! - [`validation`] - Barcode and order-number validation
//! - [`matching`] - Typeahead customer matching
//! - [`session`] - Scan session state machine with the re-arm gate
//! - [`config`] - Runtime scan settings
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use gastrack_core::types::{CustomerRecord, OrganizationFormatConfig};
//! use gastrack_core::validation::validate_barcode;
//! use gastrack_core::matching::find_customers;
//!
//! let config = OrganizationFormatConfig::default();
//! assert!(validate_barcode("CYL-0042", &config).is_ok());
//!
//! let customers = vec![
//!     CustomerRecord::new("80000001", "Acme Welding", Some("ACME1")),
//!     CustomerRecord::new("80000002", "Bay Gas", None),
//! ];
//! let hits = find_customers("acme", &customers);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id, "80000001");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod matching;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::ScanSettings;
pub use error::{CoreError, CoreResult, FieldKind, ValidationError};
pub use matching::{find_customers, rank_customers, MatchBucket, MatchCandidate};
pub use session::{ScanHandoff, ScanOutcome, ScanSession, ScanState};
pub use types::*;
pub use validation::{
    validate_barcode, validate_order_number, CompiledFormats, PatternWarning, ValidationOutcome,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Shortest barcode accepted by the length rule.
pub const MIN_BARCODE_LENGTH: usize = 3;

/// Longest barcode accepted by the length rule.
pub const MAX_BARCODE_LENGTH: usize = 50;

/// Default delay after an accepted scan before the same target accepts
/// another read. A continuous camera feed decodes the same code many times
/// per second.
pub const DEFAULT_REARM_WINDOW_MS: u64 = 1500;
