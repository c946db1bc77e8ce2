//! PostgreSQL Password Policy Adapter
//!
//! This module provides the database adapter for the password policy domain,
//! implementing the `PasswordPolicyPort` trait on top of
//! `PasswordPolicyRepository`.
//!
//! # Error Handling
//!
//! Database errors are translated to `PortError` without retries:
//! - `DatabaseError::NotFound` -> `PortError::NotFound`
//! - `DatabaseError::DuplicateEntry` -> `PortError::Conflict`
//! - `DatabaseError::Validation` -> `PortError::Validation`
//! - connection and pool errors -> `PortError::Connection`
//! - Other errors -> `PortError::Internal`

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PasswordPolicyId, PortError,
};
use domain_password_policy::{PasswordPolicy, PasswordPolicyPort};

use crate::error::DatabaseError;
use crate::repositories::password_policy::{PasswordPolicyRepository, PasswordPolicyRow};

const ADAPTER_ID: &str = "postgres-password-policy-adapter";

/// PostgreSQL-backed implementation of the PasswordPolicyPort trait
#[derive(Debug, Clone)]
pub struct PostgresPasswordPolicyAdapter {
    repository: PasswordPolicyRepository,
    pool: PgPool,
}

impl PostgresPasswordPolicyAdapter {
    /// Creates a new adapter over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PasswordPolicyRepository::new(pool.clone()),
            pool,
        }
    }

    /// Returns a reference to the underlying repository
    ///
    /// Write operations are not part of the port; administration code
    /// reaches them through here.
    pub fn repository(&self) -> &PasswordPolicyRepository {
        &self.repository
    }
}

impl DomainPort for PostgresPasswordPolicyAdapter {}

#[async_trait]
impl HealthCheckable for PostgresPasswordPolicyAdapter {
    /// Performs a simple SELECT 1 query to verify the pool is operational
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl PasswordPolicyPort for PostgresPasswordPolicyAdapter {
    #[instrument(skip(self))]
    async fn find_by_key(&self, key: &str) -> Result<Option<PasswordPolicy>, PortError> {
        debug!("Fetching password policy by key");

        let row = self
            .repository
            .find_by_key(key)
            .await
            .map_err(db_to_port_error)?;

        Ok(row.map(row_to_policy))
    }

    #[instrument(skip(self))]
    async fn find_required_policies_ordered_by_priority(
        &self,
    ) -> Result<Vec<PasswordPolicy>, PortError> {
        let rows = self
            .repository
            .find_required_ordered_by_priority()
            .await
            .map_err(db_to_port_error)?;

        debug!(count = rows.len(), "Fetched required password policies");
        Ok(rows.into_iter().map(row_to_policy).collect())
    }

    #[instrument(skip(self))]
    async fn find_latest_update_date(&self) -> Result<Option<DateTime<Utc>>, PortError> {
        let latest = self
            .repository
            .find_latest_update_date()
            .await
            .map_err(db_to_port_error)?;

        debug!(latest = ?latest, "Fetched password policy watermark");
        Ok(latest)
    }
}

/// Converts a database row to the domain record
fn row_to_policy(row: PasswordPolicyRow) -> PasswordPolicy {
    PasswordPolicy {
        id: PasswordPolicyId::new(row.id),
        key: row.key,
        name: row.name,
        description: row.description,
        validation_rules: row.validation_rules,
        priority: row.priority,
        required: row.required,
        created_by: row.created_by,
        create_date: row.create_date,
        updated_by: row.updated_by,
        update_date: row.update_date,
    }
}

/// Translates database errors to port errors
fn db_to_port_error(error: DatabaseError) -> PortError {
    match error {
        DatabaseError::NotFound(message) => PortError::NotFound {
            entity_type: "PasswordPolicy".to_string(),
            id: message,
        },
        DatabaseError::DuplicateEntry(message) => PortError::conflict(message),
        DatabaseError::Validation(message) => PortError::validation(message),
        e if e.is_connection_error() => PortError::Connection {
            message: e.to_string(),
            source: Some(Box::new(e)),
        },
        e => PortError::internal_with_source("password policy query failed", e),
    }
}
