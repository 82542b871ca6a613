//! # gastrack-db: Local Cache for GasTrack Scan
//!
//! Stores the customer list and organization format config the scan screen
//! last fetched, so scanning keeps working without a connection.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        GasTrack Scan Data Flow                          │
//! │                                                                         │
//! │  Hosted backend ──fetch──► replace_all / upsert                        │
//! │                                  │                                      │
//! │  ┌───────────────────────────────▼─────────────────────────────────┐   │
//! │  │                   gastrack-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │   Repositories     │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│ CustomerRepository │  │ (embedded) │  │   │
//! │  │   │  SqlitePool   │    │ FormatConfigRepo.  │  │            │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                  │                                      │
//! │                                  ▼ Vec<CustomerRecord>, FormatConfig    │
//! │                         gastrack-core (pure)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gastrack_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("gastrack-cache.db")).await?;
//! db.customers().replace_all("org-1", &fetched).await?;
//!
//! let customers = db.customers().list("org-1").await?;
//! let formats = db.format_configs().get("org-1").await?.unwrap_or_default();
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::customer::CustomerRepository;
pub use repository::format_config::FormatConfigRepository;
