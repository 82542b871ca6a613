//! # Repository Module
//!
//! Cache repositories for the scan screen.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Scan screen                                                            │
//! │       │                                                                 │
//! │       │  db.customers().list("org-1")                                  │
//! │       ▼                                                                 │
//! │  CustomerRepository                                                    │
//! │  ├── replace_all(&self, org, snapshot)                                 │
//! │  ├── list(&self, org)                                                  │
//! │  ├── get_by_id(&self, org, id)                                         │
//! │  └── find_by_barcode(&self, org, barcode)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite cache                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - Customer snapshots
//! - [`FormatConfigRepository`](format_config::FormatConfigRepository) - Organization formats

pub mod customer;
pub mod format_config;
