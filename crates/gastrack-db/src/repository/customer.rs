//! # Customer Repository
//!
//! Cached customer snapshots, one per organization.
//!
//! ## Refresh Model
//! ```text
//! fetch from backend ──► replace_all(org, snapshot)
//!                            │ one transaction
//!                            ├── DELETE org rows
//!                            ├── INSERT rows with position = index
//!                            └── UPSERT customer_snapshots (count, refreshed_at)
//!
//! scan screen ──► list(org) ──► same order as fetched ──► find_customers
//! ```
//!
//! The matcher ranks within input order, so `list` returns rows in the
//! order the snapshot was stored rather than sorted.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use gastrack_core::CustomerRecord;

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: String,
    name: String,
    barcode: Option<String>,
}

impl From<CustomerRow> for CustomerRecord {
    fn from(row: CustomerRow) -> Self {
        CustomerRecord {
            id: row.id,
            name: row.name,
            barcode: row.barcode,
        }
    }
}

/// Repository for cached customers.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Replaces an organization's cached customers with a fresh snapshot.
    ///
    /// All-or-nothing: a snapshot with a repeated ID is rejected before
    /// anything is written.
    pub async fn replace_all(&self, organization_id: &str, customers: &[CustomerRecord]) -> DbResult<()> {
        let mut seen = HashSet::new();
        if let Some(dup) = customers.iter().find(|c| !seen.insert(c.id.as_str())) {
            return Err(DbError::duplicate("customer id", dup.id.clone()));
        }

        debug!(organization_id, count = customers.len(), "Replacing customer snapshot");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM customers WHERE organization_id = ?1")
            .bind(organization_id)
            .execute(&mut *tx)
            .await?;

        for (position, customer) in customers.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO customers (organization_id, id, name, barcode, position, cached_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(organization_id)
            .bind(&customer.id)
            .bind(&customer.name)
            .bind(&customer.barcode)
            .bind(position as i64)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO customer_snapshots (organization_id, customer_count, refreshed_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (organization_id) DO UPDATE SET
                customer_count = excluded.customer_count,
                refreshed_at = excluded.refreshed_at
            "#,
        )
        .bind(organization_id)
        .bind(customers.len() as i64)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(organization_id, count = customers.len(), "Customer snapshot cached");
        Ok(())
    }

    /// Lists an organization's customers in snapshot order.
    pub async fn list(&self, organization_id: &str) -> DbResult<Vec<CustomerRecord>> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, name, barcode
            FROM customers
            WHERE organization_id = ?1
            ORDER BY position
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(organization_id, count = rows.len(), "Loaded cached customers");
        Ok(rows.into_iter().map(CustomerRecord::from).collect())
    }

    /// Gets a cached customer by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(CustomerRecord))` - Customer found
    /// * `Ok(None)` - Not in the cache
    pub async fn get_by_id(&self, organization_id: &str, id: &str) -> DbResult<Option<CustomerRecord>> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, name, barcode
            FROM customers
            WHERE organization_id = ?1 AND id = ?2
            "#,
        )
        .bind(organization_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CustomerRecord::from))
    }

    /// Finds customers whose trimmed barcode equals the trimmed input exactly.
    ///
    /// Barcodes are not unique, so this can return several customers.
    pub async fn find_by_barcode(&self, organization_id: &str, barcode: &str) -> DbResult<Vec<CustomerRecord>> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, name, barcode
            FROM customers
            WHERE organization_id = ?1 AND TRIM(barcode) = ?2
            ORDER BY position
            "#,
        )
        .bind(organization_id)
        .bind(barcode)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CustomerRecord::from).collect())
    }

    /// Counts an organization's cached customers.
    pub async fn count(&self, organization_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE organization_id = ?1")
            .bind(organization_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// When the organization's snapshot was last written, if ever.
    ///
    /// An empty snapshot still counts as a refresh.
    pub async fn last_refreshed(&self, organization_id: &str) -> DbResult<Option<DateTime<Utc>>> {
        let refreshed_at: Option<DateTime<Utc>> = sqlx::query_scalar(
            "SELECT refreshed_at FROM customer_snapshots WHERE organization_id = ?1",
        )
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(refreshed_at)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
