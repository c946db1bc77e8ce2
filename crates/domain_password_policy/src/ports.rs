//! Password Policy Ports
//!
//! `PasswordPolicyPort` is the read-only contract the policy store offers to
//! its consumers. Adapters:
//!
//! - **Postgres Adapter**: `infra_db::adapters::PostgresPasswordPolicyAdapter`
//! - **In-Memory Adapter**: `mock::InMemoryPasswordPolicyPort`, for tests
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_password_policy::{PasswordPolicyPort, PasswordPolicyPortExt};
//! use std::sync::Arc;
//!
//! let port: Arc<dyn PasswordPolicyPort> = Arc::new(PostgresPasswordPolicyAdapter::new(pool));
//! for policy in port.find_required_policies_ordered_by_priority().await? {
//!     println!("{} ({})", policy.key, policy.priority);
//! }
//! ```
//!
//! Absence is never an error: a missing key is `None`, an empty table yields
//! an empty list and no watermark. Store failures are reported as
//! `PortError` and are not retried here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{DomainPort, HealthCheckable, PortError};

use crate::policy::PasswordPolicy;

/// Read operations over the password policy store
#[async_trait]
pub trait PasswordPolicyPort: DomainPort + HealthCheckable {
    /// Finds the policy with the given key
    ///
    /// # Returns
    ///
    /// The policy, or `None` if no policy has this key
    async fn find_by_key(&self, key: &str) -> Result<Option<PasswordPolicy>, PortError>;

    /// Lists every required policy, ascending by priority
    ///
    /// Policies sharing a priority come back in ascending identifier order;
    /// callers must not depend on that tie-break.
    async fn find_required_policies_ordered_by_priority(
        &self,
    ) -> Result<Vec<PasswordPolicy>, PortError>;

    /// Returns the latest `update_date` across all policies
    ///
    /// # Returns
    ///
    /// `None` when the store holds no policies
    async fn find_latest_update_date(&self) -> Result<Option<DateTime<Utc>>, PortError>;
}

/// Extension trait for PasswordPolicyPort with convenience methods
#[async_trait]
pub trait PasswordPolicyPortExt: PasswordPolicyPort {
    /// Gets a policy by key or returns `PortError::NotFound`
    async fn get_by_key_required(&self, key: &str) -> Result<PasswordPolicy, PortError> {
        self.find_by_key(key)
            .await?
            .ok_or_else(|| PortError::not_found("PasswordPolicy", key))
    }

    /// Returns true if the store watermark differs from `since`
    ///
    /// Any difference counts, including the watermark moving backwards after
    /// the most recently updated policy was deleted.
    async fn is_stale(&self, since: Option<DateTime<Utc>>) -> Result<bool, PortError> {
        let latest = self.find_latest_update_date().await?;
        Ok(latest != since)
    }
}

impl<T: PasswordPolicyPort + ?Sized> PasswordPolicyPortExt for T {}

/// In-memory implementation for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult, PasswordPolicyId};

    use crate::error::PolicyError;
    use crate::policy::{NewPasswordPolicy, UpdatePasswordPolicy};
    use crate::validation;

    /// In-memory policy store
    ///
    /// Behaves like the relational store: identifiers are assigned on insert,
    /// keys are unique, and updates stamp `update_date`.
    #[derive(Debug)]
    pub struct InMemoryPasswordPolicyPort {
        policies: Arc<RwLock<BTreeMap<PasswordPolicyId, PasswordPolicy>>>,
        next_id: AtomicI64,
        unavailable: AtomicBool,
    }

    impl Default for InMemoryPasswordPolicyPort {
        fn default() -> Self {
            Self {
                policies: Arc::new(RwLock::new(BTreeMap::new())),
                next_id: AtomicI64::new(1),
                unavailable: AtomicBool::new(false),
            }
        }
    }

    impl InMemoryPasswordPolicyPort {
        /// Creates an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with fully formed policies, keeping their identifiers
        /// and timestamps
        pub async fn with_policies(policies: Vec<PasswordPolicy>) -> Self {
            let port = Self::new();
            {
                let mut store = port.policies.write().await;
                for policy in policies {
                    store.insert(policy.id, policy);
                }
                let next = store.keys().next_back().map(|id| id.value() + 1).unwrap_or(1);
                port.next_id.store(next, Ordering::SeqCst);
            }
            port
        }

        /// Simulates a store outage; every read fails with a connection error
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// Inserts a new policy
        pub async fn insert(&self, request: NewPasswordPolicy) -> Result<PasswordPolicy, PolicyError> {
            validation::validate_new(&request)?;

            let mut store = self.policies.write().await;
            if store.values().any(|p| p.key == request.key) {
                return Err(PolicyError::DuplicateKey(request.key));
            }

            let now = Utc::now();
            let id = PasswordPolicyId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
            let policy = PasswordPolicy {
                id,
                key: request.key,
                name: request.name,
                description: request.description,
                validation_rules: request.validation_rules,
                priority: request.priority,
                required: request.required,
                created_by: request.created_by,
                create_date: now,
                updated_by: None,
                update_date: now,
            };
            store.insert(id, policy.clone());
            Ok(policy)
        }

        /// Applies a partial update
        pub async fn update(
            &self,
            id: PasswordPolicyId,
            request: UpdatePasswordPolicy,
        ) -> Result<PasswordPolicy, PolicyError> {
            validation::validate_update(&request)?;

            let mut store = self.policies.write().await;
            let policy = store.get_mut(&id).ok_or_else(|| PolicyError::not_found(id))?;
            request.apply_to(policy, Utc::now());
            Ok(policy.clone())
        }

        /// Removes a policy, returning whether it existed
        pub async fn delete(&self, id: PasswordPolicyId) -> bool {
            self.policies.write().await.remove(&id).is_some()
        }

        /// Number of stored policies
        pub async fn len(&self) -> usize {
            self.policies.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.policies.read().await.is_empty()
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                Err(PortError::connection("in-memory policy store is unavailable"))
            } else {
                Ok(())
            }
        }
    }

    impl DomainPort for InMemoryPasswordPolicyPort {}

    #[async_trait]
    impl HealthCheckable for InMemoryPasswordPolicyPort {
        async fn health_check(&self) -> HealthCheckResult {
            let status = if self.unavailable.load(Ordering::SeqCst) {
                AdapterHealth::Unhealthy
            } else {
                AdapterHealth::Healthy
            };
            HealthCheckResult {
                adapter_id: "in-memory-password-policy-port".to_string(),
                status,
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl PasswordPolicyPort for InMemoryPasswordPolicyPort {
        async fn find_by_key(&self, key: &str) -> Result<Option<PasswordPolicy>, PortError> {
            self.check_available()?;
            Ok(self
                .policies
                .read()
                .await
                .values()
                .find(|p| p.key == key)
                .cloned())
        }

        async fn find_required_policies_ordered_by_priority(
            &self,
        ) -> Result<Vec<PasswordPolicy>, PortError> {
            self.check_available()?;
            let mut required: Vec<PasswordPolicy> = self
                .policies
                .read()
                .await
                .values()
                .filter(|p| p.required)
                .cloned()
                .collect();
            required.sort_by(PasswordPolicy::priority_order);
            Ok(required)
        }

        async fn find_latest_update_date(&self) -> Result<Option<DateTime<Utc>>, PortError> {
            self.check_available()?;
            Ok(self
                .policies
                .read()
                .await
                .values()
                .map(|p| p.update_date)
                .max())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::InMemoryPasswordPolicyPort;
    use super::*;
    use crate::policy::{NewPasswordPolicy, UpdatePasswordPolicy};
    use crate::error::PolicyError;

    #[tokio::test]
    async fn test_get_by_key_required_reports_not_found() {
        let port = InMemoryPasswordPolicyPort::new();

        let err = port.get_by_key_required("nonexistent").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("nonexistent"));
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let port = InMemoryPasswordPolicyPort::new();

        let first = port.insert(NewPasswordPolicy::new("a", "A", 1)).await.unwrap();
        let second = port.insert(NewPasswordPolicy::new("b", "B", 2)).await.unwrap();

        assert_eq!(first.id.value(), 1);
        assert_eq!(second.id.value(), 2);
        assert_eq!(first.create_date, first.update_date);
    }

    #[tokio::test]
    async fn test_duplicate_key_rejected() {
        let port = InMemoryPasswordPolicyPort::new();
        port.insert(NewPasswordPolicy::new("minLength", "Min", 1)).await.unwrap();

        let err = port
            .insert(NewPasswordPolicy::new("minLength", "Other", 2))
            .await
            .unwrap_err();
        assert!(matches!(err, PolicyError::DuplicateKey(ref k) if k == "minLength"));
        assert_eq!(port.len().await, 1);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_reads() {
        let port = InMemoryPasswordPolicyPort::new();
        port.set_unavailable(true);

        let err = port.find_latest_update_date().await.unwrap_err();
        assert!(err.is_transient());
        assert!(!port.health_check().await.is_healthy());
    }

    #[tokio::test]
    async fn test_is_stale() {
        let port = InMemoryPasswordPolicyPort::new();
        assert!(!port.is_stale(None).await.unwrap());

        let policy = port.insert(NewPasswordPolicy::new("a", "A", 1)).await.unwrap();
        assert!(port.is_stale(None).await.unwrap());
        assert!(!port.is_stale(Some(policy.update_date)).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_without_changes_keeps_watermark() {
        let port = InMemoryPasswordPolicyPort::new();
        let policy = port.insert(NewPasswordPolicy::new("a", "A", 1)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let err = port
            .update(policy.id, UpdatePasswordPolicy::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PolicyError::ValidationFailed(_)));

        let only_actor = UpdatePasswordPolicy {
            updated_by: Some("admin".to_string()),
            ..Default::default()
        };
        assert!(port.update(policy.id, only_actor).await.is_err());

        assert_eq!(
            port.find_latest_update_date().await.unwrap(),
            Some(policy.update_date)
        );
        assert!(!port.is_stale(Some(policy.update_date)).await.unwrap());
    }
}
