//! Password policy repository implementation
//!
//! This module provides database access for the `password_policies` table.
//! The three read queries consumers depend on are:
//!
//! - lookup by key
//! - required policies ordered by ascending priority
//! - the latest `update_date` (freshness watermark)
//!
//! The remaining methods are the generic by-id operations an administration
//! layer uses to maintain the table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use domain_password_policy::validation;
use domain_password_policy::{NewPasswordPolicy, UpdatePasswordPolicy};

use crate::error::DatabaseError;

/// Repository for password policy records
///
/// Holds no state besides the pool; every method is a single statement and
/// runs under whatever isolation the pool's connections are configured with.
#[derive(Debug, Clone)]
pub struct PasswordPolicyRepository {
    pool: PgPool,
}

impl PasswordPolicyRepository {
    /// Creates a new PasswordPolicyRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves the policy with the given key
    ///
    /// # Returns
    ///
    /// The policy row, or `None` when no policy has this key
    pub async fn find_by_key(&self, key: &str) -> Result<Option<PasswordPolicyRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PasswordPolicyRow>(
            r#"
            SELECT
                id, key, name, description, validation_rules, priority, required,
                created_by, create_date, updated_by, update_date
            FROM password_policies
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves all required policies, ascending by priority
    ///
    /// Ties on priority are ordered by id so the listing is deterministic.
    pub async fn find_required_ordered_by_priority(
        &self,
    ) -> Result<Vec<PasswordPolicyRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PasswordPolicyRow>(
            r#"
            SELECT
                id, key, name, description, validation_rules, priority, required,
                created_by, create_date, updated_by, update_date
            FROM password_policies
            WHERE required = TRUE
            ORDER BY priority ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Retrieves the latest update date across all policies
    ///
    /// # Returns
    ///
    /// `None` when the table is empty
    pub async fn find_latest_update_date(&self) -> Result<Option<DateTime<Utc>>, DatabaseError> {
        let latest = sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
            "SELECT MAX(update_date) FROM password_policies",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(latest)
    }

    /// Retrieves a policy by id
    pub async fn find_by_id(&self, id: i64) -> Result<Option<PasswordPolicyRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PasswordPolicyRow>(
            r#"
            SELECT
                id, key, name, description, validation_rules, priority, required,
                created_by, create_date, updated_by, update_date
            FROM password_policies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves every policy, required or not, in priority order
    pub async fn find_all(&self) -> Result<Vec<PasswordPolicyRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PasswordPolicyRow>(
            r#"
            SELECT
                id, key, name, description, validation_rules, priority, required,
                created_by, create_date, updated_by, update_date
            FROM password_policies
            ORDER BY priority ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Counts all policies
    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM password_policies")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Checks whether a policy with the given id exists
    pub async fn exists_by_id(&self, id: i64) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM password_policies WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Inserts a new policy
    ///
    /// The id, `create_date` and `update_date` are assigned by the database.
    ///
    /// # Errors
    ///
    /// * `DatabaseError::Validation` if the request is malformed
    /// * `DatabaseError::DuplicateEntry` if the key is already taken
    pub async fn insert(&self, policy: &NewPasswordPolicy) -> Result<PasswordPolicyRow, DatabaseError> {
        validation::validate_new(policy)?;
        debug!(key = %policy.key, "Inserting password policy");

        let row = sqlx::query_as::<_, PasswordPolicyRow>(
            r#"
            INSERT INTO password_policies (
                key, name, description, validation_rules, priority, required, created_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, key, name, description, validation_rules, priority, required,
                created_by, create_date, updated_by, update_date
            "#,
        )
        .bind(&policy.key)
        .bind(&policy.name)
        .bind(&policy.description)
        .bind(&policy.validation_rules)
        .bind(policy.priority)
        .bind(policy.required)
        .bind(&policy.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match DatabaseError::from(&e) {
            DatabaseError::DuplicateEntry(_) => {
                DatabaseError::duplicate("PasswordPolicy", "key", &policy.key)
            }
            other => other,
        })?;

        Ok(row)
    }

    /// Applies a partial update and stamps `update_date`
    ///
    /// The stamp is taken with `clock_timestamp()` when the row is written,
    /// not at transaction start, so an update that waited on a row lock still
    /// lands above the watermark other writers committed meanwhile.
    ///
    /// # Errors
    ///
    /// * `DatabaseError::Validation` if the request changes no policy field
    /// * `DatabaseError::NotFound` if no policy has this id
    pub async fn update(
        &self,
        id: i64,
        changes: &UpdatePasswordPolicy,
    ) -> Result<PasswordPolicyRow, DatabaseError> {
        validation::validate_update(changes)?;
        debug!(id, "Updating password policy");

        let row = sqlx::query_as::<_, PasswordPolicyRow>(
            r#"
            UPDATE password_policies SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                validation_rules = COALESCE($4, validation_rules),
                priority = COALESCE($5, priority),
                required = COALESCE($6, required),
                updated_by = COALESCE($7, updated_by),
                update_date = clock_timestamp()
            WHERE id = $1
            RETURNING
                id, key, name, description, validation_rules, priority, required,
                created_by, create_date, updated_by, update_date
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.validation_rules)
        .bind(changes.priority)
        .bind(changes.required)
        .bind(&changes.updated_by)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("PasswordPolicy", id))?;

        Ok(row)
    }

    /// Deletes a policy by id
    ///
    /// # Returns
    ///
    /// Whether a row was deleted
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, DatabaseError> {
        debug!(id, "Deleting password policy");

        let result = sqlx::query("DELETE FROM password_policies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Database row for a password policy
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PasswordPolicyRow {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub validation_rules: serde_json::Value,
    pub priority: i32,
    pub required: bool,
    pub created_by: Option<String>,
    pub create_date: DateTime<Utc>,
    pub updated_by: Option<String>,
    pub update_date: DateTime<Utc>,
}
