//! PostgreSQL integration tests for the password policy repository and adapter
//!
//! Each test starts its own container; run with `cargo test -- --ignored`.

use std::sync::Arc;

use domain_password_policy::{
    NewPasswordPolicy, PasswordPolicyPort, RequiredPolicyCache, UpdatePasswordPolicy,
};
use core_kernel::HealthCheckable;
use infra_db::{DatabaseError, PasswordPolicyRepository, PostgresPasswordPolicyAdapter};
use test_utils::{
    assert_all_required, assert_keys, assert_priority_ascending, db_test, PolicyFixtures,
    TemporalFixtures, TestDatabase,
};

async fn seed_standard_set(repository: &PasswordPolicyRepository) {
    for request in PolicyFixtures::standard_set() {
        repository.insert(&request).await.expect("seed insert failed");
    }
}

// ============================================================================
// Lookup by key
// ============================================================================

db_test!(test_find_by_key_missing_is_none, |pool| {
    let repository = PasswordPolicyRepository::new(pool);
    seed_standard_set(&repository).await;

    let found = repository.find_by_key("nonexistent").await.unwrap();
    assert!(found.is_none());
});

db_test!(test_find_by_key_returns_stored_row, |pool| {
    let repository = PasswordPolicyRepository::new(pool);
    let inserted = repository.insert(&PolicyFixtures::min_length()).await.unwrap();

    let found = repository.find_by_key("minLength").await.unwrap().unwrap();
    assert_eq!(found, inserted);
    assert_eq!(found.validation_rules["minLength"], 12);
    assert_eq!(found.create_date, found.update_date);
});

db_test!(test_duplicate_key_is_rejected, |pool| {
    let repository = PasswordPolicyRepository::new(pool);
    repository.insert(&PolicyFixtures::min_length()).await.unwrap();

    let err = repository
        .insert(&NewPasswordPolicy::new("minLength", "Another", 9))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::DuplicateEntry(ref m) if m.contains("minLength")));
    assert_eq!(repository.count().await.unwrap(), 1);
});

db_test!(test_invalid_request_never_reaches_database, |pool| {
    let repository = PasswordPolicyRepository::new(pool);

    let err = repository
        .insert(&NewPasswordPolicy::new("min length", "Spaces", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Validation(_)));
    assert_eq!(repository.count().await.unwrap(), 0);
});

// ============================================================================
// Required policies
// ============================================================================

db_test!(test_required_policies_in_priority_order, |pool| {
    let adapter = PostgresPasswordPolicyAdapter::new(pool);
    seed_standard_set(adapter.repository()).await;

    let required = adapter.find_required_policies_ordered_by_priority().await.unwrap();

    assert_all_required(&required);
    assert_priority_ascending(&required);
    assert_keys(&required, &PolicyFixtures::standard_required_keys());
});

db_test!(test_required_policies_empty_table, |pool| {
    let adapter = PostgresPasswordPolicyAdapter::new(pool);

    let required = adapter.find_required_policies_ordered_by_priority().await.unwrap();
    assert!(required.is_empty());
});

db_test!(test_equal_priorities_ordered_by_id, |pool| {
    let repository = PasswordPolicyRepository::new(pool);
    repository
        .insert(&NewPasswordPolicy::new("second", "Second", 1).required(true))
        .await
        .unwrap();
    repository
        .insert(&NewPasswordPolicy::new("first", "First", 1).required(true))
        .await
        .unwrap();

    let rows = repository.find_required_ordered_by_priority().await.unwrap();
    let keys: Vec<_> = rows.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["second", "first"]);
});

// ============================================================================
// Latest update date
// ============================================================================

db_test!(test_latest_update_date_empty_table, |pool| {
    let repository = PasswordPolicyRepository::new(pool);
    assert_eq!(repository.find_latest_update_date().await.unwrap(), None);
});

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_latest_update_date_is_maximum() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let repository = PasswordPolicyRepository::new(db.pool().clone());

    let (t1, t2, t3) = TemporalFixtures::ascending_triple();
    let a = repository.insert(&PolicyFixtures::min_length()).await.unwrap();
    let b = repository.insert(&PolicyFixtures::max_age()).await.unwrap();
    let c = repository.insert(&PolicyFixtures::history()).await.unwrap();
    db.set_update_date(a.id, t2).await.unwrap();
    db.set_update_date(b.id, t3).await.unwrap();
    db.set_update_date(c.id, t1).await.unwrap();

    assert_eq!(repository.find_latest_update_date().await.unwrap(), Some(t3));

    db.clear_data().await.unwrap();
    assert_eq!(repository.find_latest_update_date().await.unwrap(), None);
}

db_test!(test_update_bumps_watermark, |pool| {
    let repository = PasswordPolicyRepository::new(pool);
    let inserted = repository.insert(&PolicyFixtures::max_age()).await.unwrap();
    let before = repository.find_latest_update_date().await.unwrap().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let updated = repository
        .update(
            inserted.id,
            &UpdatePasswordPolicy {
                priority: Some(7),
                updated_by: Some("admin".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.priority, 7);
    assert_eq!(updated.name, inserted.name);
    assert_eq!(updated.updated_by.as_deref(), Some("admin"));
    assert!(updated.update_date > before);
    assert_eq!(
        repository.find_latest_update_date().await.unwrap(),
        Some(updated.update_date)
    );
});

db_test!(test_update_without_changes_is_rejected, |pool| {
    let repository = PasswordPolicyRepository::new(pool);
    let inserted = repository.insert(&PolicyFixtures::max_age()).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let err = repository
        .update(inserted.id, &UpdatePasswordPolicy::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Validation(_)));

    let only_actor = UpdatePasswordPolicy {
        updated_by: Some("admin".to_string()),
        ..Default::default()
    };
    assert!(repository.update(inserted.id, &only_actor).await.is_err());

    let stored = repository.find_by_id(inserted.id).await.unwrap().unwrap();
    assert_eq!(stored, inserted);
    assert_eq!(
        repository.find_latest_update_date().await.unwrap(),
        Some(inserted.update_date)
    );
});

db_test!(test_update_blocked_by_row_lock_still_moves_watermark, |pool| {
    let repository = PasswordPolicyRepository::new(pool.clone());
    let a = repository.insert(&PolicyFixtures::min_length()).await.unwrap();
    let b = repository.insert(&PolicyFixtures::max_age()).await.unwrap();

    // hold a write lock on `a` so the repository update has to wait
    let mut tx = pool.begin().await.unwrap();
    sqlx::query("UPDATE password_policies SET name = name WHERE id = $1")
        .bind(a.id)
        .execute(&mut *tx)
        .await
        .unwrap();

    let blocked = {
        let repository = repository.clone();
        tokio::spawn(async move {
            repository
                .update(
                    a.id,
                    &UpdatePasswordPolicy {
                        priority: Some(5),
                        ..Default::default()
                    },
                )
                .await
        })
    };
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    sqlx::query("UPDATE password_policies SET update_date = clock_timestamp() WHERE id = $1")
        .bind(b.id)
        .execute(&mut *tx)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let updated = blocked.await.unwrap().unwrap();
    let b_after = repository.find_by_id(b.id).await.unwrap().unwrap();

    assert!(updated.update_date > b_after.update_date);
    assert_eq!(
        repository.find_latest_update_date().await.unwrap(),
        Some(updated.update_date)
    );
});

// ============================================================================
// Base repository operations
// ============================================================================

db_test!(test_crud_by_id, |pool| {
    let repository = PasswordPolicyRepository::new(pool);
    seed_standard_set(&repository).await;

    let all = repository.find_all().await.unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(repository.count().await.unwrap(), 4);

    let history = repository.find_by_key("passwordHistory").await.unwrap().unwrap();
    assert!(repository.exists_by_id(history.id).await.unwrap());
    assert_eq!(repository.find_by_id(history.id).await.unwrap(), Some(history.clone()));

    assert!(repository.delete_by_id(history.id).await.unwrap());
    assert!(!repository.delete_by_id(history.id).await.unwrap());
    assert!(!repository.exists_by_id(history.id).await.unwrap());
    assert_eq!(repository.count().await.unwrap(), 3);
});

db_test!(test_update_missing_is_not_found, |pool| {
    let repository = PasswordPolicyRepository::new(pool);

    let err = repository
        .update(
            999,
            &UpdatePasswordPolicy {
                required: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());
});

// ============================================================================
// Adapter extras
// ============================================================================

db_test!(test_health_check_against_live_database, |pool| {
    let adapter = PostgresPasswordPolicyAdapter::new(pool);
    let health = adapter.health_check().await;
    assert!(health.is_healthy());
});

db_test!(test_cache_over_postgres_adapter, |pool| {
    let adapter = Arc::new(PostgresPasswordPolicyAdapter::new(pool));
    seed_standard_set(adapter.repository()).await;

    let cache = RequiredPolicyCache::new(adapter.clone());
    let first = cache.required_policies().await.unwrap();
    cache.required_policies().await.unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(cache.load_count(), 1);

    let complexity = adapter.repository().find_by_key("complexity").await.unwrap().unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    adapter
        .repository()
        .update(
            complexity.id,
            &UpdatePasswordPolicy {
                required: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let reloaded = cache.required_policies().await.unwrap();
    assert_keys(&reloaded, &["minLength", "maxAge"]);
    assert_eq!(cache.load_count(), 2);
});
