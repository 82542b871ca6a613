//! # Format Config Repository
//!
//! Cached organization format configs, stored as the same JSON the hosted
//! backend keeps on the organization row.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use gastrack_core::OrganizationFormatConfig;

/// Repository for cached organization format configs.
#[derive(Debug, Clone)]
pub struct FormatConfigRepository {
    pool: SqlitePool,
}

impl FormatConfigRepository {
    /// Creates a new FormatConfigRepository.
    pub fn new(pool: SqlitePool) -> Self {
        FormatConfigRepository { pool }
    }

    /// Stores or replaces an organization's format config.
    pub async fn upsert(&self, organization_id: &str, config: &OrganizationFormatConfig) -> DbResult<()> {
        let json = serde_json::to_string(config)?;

        debug!(organization_id, "Caching format config");

        sqlx::query(
            r#"
            INSERT INTO organization_formats (organization_id, config_json, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (organization_id) DO UPDATE SET
                config_json = excluded.config_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(organization_id)
        .bind(json)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets an organization's cached format config.
    ///
    /// ## Returns
    /// * `Ok(Some(config))` - Config cached
    /// * `Ok(None)` - Nothing cached; callers use the default (generic rules)
    pub async fn get(&self, organization_id: &str) -> DbResult<Option<OrganizationFormatConfig>> {
        let json: Option<String> =
            sqlx::query_scalar("SELECT config_json FROM organization_formats WHERE organization_id = ?1")
                .bind(organization_id)
                .fetch_optional(&self.pool)
                .await?;

        json.map(|json| serde_json::from_str(&json).map_err(DbError::from))
            .transpose()
    }

    /// Removes an organization's cached format config.
    pub async fn delete(&self, organization_id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM organization_formats WHERE organization_id = ?1")
            .bind(organization_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Format config", organization_id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use gastrack_core::{CompiledFormats, FieldKind, FormatRule};

    async fn repo() -> FormatConfigRepository {
        Database::new(DbConfig::in_memory())
            .await
            .unwrap()
            .format_configs()
    }

    fn config() -> OrganizationFormatConfig {
        OrganizationFormatConfig {
            barcode_format: Some(
                FormatRule::with_pattern("^[0-9]{6}$")
                    .description("6-digit cylinder number")
                    .examples(["100001", "100002"]),
            ),
            order_number_format: Some(FormatRule::with_pattern("(unclosed")),
        }
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let repo = repo().await;
        assert!(repo.get("org-1").await.unwrap().is_none());

        repo.upsert("org-1", &config()).await.unwrap();
        assert_eq!(repo.get("org-1").await.unwrap(), Some(config()));

        repo.upsert("org-1", &OrganizationFormatConfig::default())
            .await
            .unwrap();
        assert_eq!(
            repo.get("org-1").await.unwrap(),
            Some(OrganizationFormatConfig::default())
        );
    }

    #[tokio::test]
    async fn test_cached_invalid_pattern_still_compiles_with_warning() {
        let repo = repo().await;
        repo.upsert("org-1", &config()).await.unwrap();

        let cached = repo.get("org-1").await.unwrap().unwrap_or_default();
        let formats = CompiledFormats::compile(&cached);
        assert!(formats.has_pattern(FieldKind::Barcode));
        assert!(!formats.has_pattern(FieldKind::OrderNumber));
        assert_eq!(formats.warnings().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_json_is_serialization_error() {
        let repo = repo().await;
        sqlx::query(
            "INSERT INTO organization_formats (organization_id, config_json, updated_at) VALUES ('org-1', '{oops', '2026-01-01T00:00:00Z')",
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        let err = repo.get("org-1").await.unwrap_err();
        assert!(matches!(err, DbError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        repo.upsert("org-1", &config()).await.unwrap();
        repo.delete("org-1").await.unwrap();
        assert!(repo.get("org-1").await.unwrap().is_none());

        let err = repo.delete("org-1").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
