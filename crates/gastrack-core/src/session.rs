//! # Scan Session
//!
//! State behind the "Scan Cylinders" screen: pick a customer, enter an
//! order number, continue.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Idle ──begin()/any input──► AwaitingCustomer                          │
//! │                                   │                                     │
//! │                                   │ select_customer(record)             │
//! │                                   ▼                                     │
//! │                          AwaitingOrderNumber                            │
//! │                                   │                                     │
//! │                                   │ valid order number, no errors       │
//! │                                   ▼                                     │
//! │                                 Ready ──proceed()──► ScanHandoff        │
//! │                                                                         │
//! │   Invalid input never advances. A rejected camera read leaves the      │
//! │   state where it was; typed input is recomputed from the fields.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Re-arm Gate
//! The camera decodes the same label many times per second. After a read
//! is accepted for a target, further reads for that target are ignored
//! until the re-arm window has passed. Rejected reads do not arm the gate,
//! so the user can immediately try again.
//!
//! Time is passed in by the caller so the gate is deterministic.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::ScanSettings;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::matching::find_customers;
use crate::types::{CustomerRecord, ScanEvent, ScanTarget};
use crate::validation::CompiledFormats;

/// Where the session is in the customer → order → continue flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ScanState {
    Idle,
    AwaitingCustomer,
    AwaitingOrderNumber,
    Ready,
}

/// What happened to a camera read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Value passed validation and was stored.
    Accepted,
    /// Value failed validation and was not stored.
    ///
    /// The error is also attached to the field when that field holds no
    /// accepted value yet.
    Rejected(ValidationError),
    /// Read arrived inside the re-arm window and was dropped.
    Ignored,
}

/// What the next screen receives once the session is ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScanHandoff {
    pub customer: CustomerRecord,
    /// Trimmed order number.
    pub order_number: String,
}

/// One scan screen's worth of state.
#[derive(Debug, Clone)]
pub struct ScanSession {
    formats: CompiledFormats,
    settings: ScanSettings,
    started: bool,
    query: String,
    selected: Option<CustomerRecord>,
    order_number: String,
    customer_error: Option<ValidationError>,
    order_error: Option<ValidationError>,
    last_accepted: HashMap<ScanTarget, DateTime<Utc>>,
}

impl ScanSession {
    /// Creates an idle session for an organization's compiled formats.
    pub fn new(formats: CompiledFormats, settings: ScanSettings) -> Self {
        ScanSession {
            formats,
            settings,
            started: false,
            query: String::new(),
            selected: None,
            order_number: String::new(),
            customer_error: None,
            order_error: None,
            last_accepted: HashMap::new(),
        }
    }

    /// Marks the screen as mounted.
    pub fn begin(&mut self) {
        self.started = true;
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn formats(&self) -> &CompiledFormats {
        &self.formats
    }

    /// Current customer search text.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_customer(&self) -> Option<&CustomerRecord> {
        self.selected.as_ref()
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn customer_error(&self) -> Option<&ValidationError> {
        self.customer_error.as_ref()
    }

    pub fn order_error(&self) -> Option<&ValidationError> {
        self.order_error.as_ref()
    }

    // -------------------------------------------------------------------------
    // Manual Input
    // -------------------------------------------------------------------------

    /// Updates the customer search text as typed.
    ///
    /// Typing drops any selected customer. Non-blank text is validated as a
    /// barcode; blank text clears the error.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.started = true;
        self.query = text.into();
        self.selected = None;
        self.customer_error = if self.query.trim().is_empty() {
            None
        } else {
            self.formats.validate_barcode(&self.query).err()
        };
    }

    /// Updates the order number as typed.
    pub fn set_order_number(&mut self, text: impl Into<String>) {
        self.started = true;
        self.order_number = text.into();
        self.order_error = if self.order_number.trim().is_empty() {
            None
        } else {
            self.formats.validate_order_number(&self.order_number).err()
        };
    }

    /// Customers matching the current search text.
    pub fn candidates<'a>(&self, customers: &'a [CustomerRecord]) -> Vec<&'a CustomerRecord> {
        find_customers(&self.query, customers)
    }

    /// Selects an exact customer record.
    ///
    /// The search text becomes the customer's name and any barcode error is
    /// cleared.
    pub fn select_customer(&mut self, customer: CustomerRecord) {
        self.started = true;
        self.query = customer.name.clone();
        self.selected = Some(customer);
        self.customer_error = None;
    }

    /// Selects a customer from a list by ID.
    pub fn select_customer_by_id(&mut self, id: &str, customers: &[CustomerRecord]) -> CoreResult<()> {
        let customer = customers
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::CustomerNotFound(id.to_string()))?;
        self.select_customer(customer.clone());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Camera Input
    // -------------------------------------------------------------------------

    /// Handles a decoded camera read for a target.
    ///
    /// ## Flow
    /// ```text
    /// read ──► inside re-arm window? ── yes ──► Ignored
    ///             │ no
    ///             ▼
    ///          validate (barcode rules for Customer, order rules for Order)
    ///             │
    ///             ├── fail ──► error on empty field ──► Rejected(err)
    ///             │
    ///             └── pass ──► value stored, gate armed ──► Accepted
    /// ```
    pub fn handle_scan(&mut self, target: ScanTarget, event: &ScanEvent, now: DateTime<Utc>) -> ScanOutcome {
        self.started = true;

        if self.is_gated(target, now) {
            debug!(?target, "Scan ignored inside re-arm window");
            return ScanOutcome::Ignored;
        }

        if let Err(err) = self.formats.validate(target.field(), &event.data) {
            debug!(?target, symbology = %event.symbology, error = %err, "Scan rejected");
            // A bad read never displaces a value already accepted.
            match target {
                ScanTarget::Customer if self.selected.is_none() => {
                    self.customer_error = Some(err.clone())
                }
                ScanTarget::Order if self.order_number.trim().is_empty() => {
                    self.order_error = Some(err.clone())
                }
                _ => {}
            }
            return ScanOutcome::Rejected(err);
        }

        match target {
            ScanTarget::Customer => self.set_query(event.data.clone()),
            ScanTarget::Order => self.set_order_number(event.data.clone()),
        }
        self.last_accepted.insert(target, now);

        debug!(?target, symbology = %event.symbology, "Scan accepted");
        ScanOutcome::Accepted
    }

    fn is_gated(&self, target: ScanTarget, now: DateTime<Utc>) -> bool {
        self.last_accepted
            .get(&target)
            .is_some_and(|accepted| now.signed_duration_since(*accepted) < self.settings.rearm_window())
    }

    // -------------------------------------------------------------------------
    // Readiness
    // -------------------------------------------------------------------------

    pub fn state(&self) -> ScanState {
        if !self.started {
            ScanState::Idle
        } else if self.selected.is_none() || self.customer_error.is_some() {
            ScanState::AwaitingCustomer
        } else if self.order_number.trim().is_empty() || self.order_error.is_some() {
            ScanState::AwaitingOrderNumber
        } else {
            ScanState::Ready
        }
    }

    pub fn can_proceed(&self) -> bool {
        self.state() == ScanState::Ready
    }

    /// Hands off the selected customer and trimmed order number.
    pub fn proceed(&self) -> CoreResult<ScanHandoff> {
        let missing = match self.state() {
            ScanState::Ready => None,
            ScanState::Idle => Some("session has not started"),
            ScanState::AwaitingCustomer => Some("select a customer"),
            ScanState::AwaitingOrderNumber => Some("enter a valid order number"),
        };
        if let Some(missing) = missing {
            return Err(CoreError::SessionNotReady {
                missing: missing.to_string(),
            });
        }

        match &self.selected {
            Some(customer) => Ok(ScanHandoff {
                customer: customer.clone(),
                order_number: self.order_number.trim().to_string(),
            }),
            None => Err(CoreError::SessionNotReady {
                missing: "select a customer".to_string(),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
