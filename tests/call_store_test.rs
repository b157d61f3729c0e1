//! Call store integration tests against SQLite
#![cfg(feature = "sqlite")]

mod common;

use common::{column_names, elevator_table_count, memory_store, TestDb, COLUMNS};
use liftlog::application::CallService;
use liftlog::domain::call::{CallField, CallStore, NewCall};
use liftlog::domain::shared::{CallTimestamp, DomainError};
use liftlog::infrastructure::persistence::{create_pool, DatabaseConfig, SqliteCallStore};
use std::sync::Arc;

fn ts(raw: &str) -> CallTimestamp {
    CallTimestamp::parse(raw).unwrap()
}

#[tokio::test]
async fn test_first_call_fallback() {
    for (demand, destination) in [(3, 5), (0, 0), (-1, 7), (12, 2)] {
        let store = memory_store().await;
        let service = CallService::new(store.clone());

        service.register_call(demand, destination).await.unwrap();

        let rows = store.get_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].current_floor, demand);
        assert_eq!(rows[0].demand_floor, demand);
        assert_eq!(rows[0].destination_floor, destination);
    }
}

#[tokio::test]
async fn test_calls_chain_through_destination() {
    let store = memory_store().await;
    let service = CallService::new(store.clone());

    service.register_call(3, 5).await.unwrap();
    service.register_call(1, 4).await.unwrap();

    let rows = store.get_all().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].id, rows[0].current_floor), (1, 3));
    assert_eq!((rows[1].id, rows[1].current_floor), (2, 5));
    assert_eq!(store.last_destination_floor().await.unwrap(), Some(4));
}

#[tokio::test]
async fn test_concurrent_registrations_stay_chained() {
    let store = memory_store().await;
    let service = Arc::new(CallService::new(store.clone()));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move { service.register_call(i % 4, (i + 1) % 6).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let rows = store.get_all().await.unwrap();
    assert_eq!(rows.len(), 10);
    for pair in rows.windows(2) {
        assert!(pair[0].id < pair[1].id);
        assert_eq!(pair[1].current_floor, pair[0].destination_floor);
    }
}

#[tokio::test]
async fn test_last_destination_floor_empty_table() {
    let store = memory_store().await;
    assert_eq!(store.last_destination_floor().await.unwrap(), None);
}

#[tokio::test]
async fn test_last_destination_floor_follows_insertion_not_edits() {
    let store = memory_store().await;
    store.insert(NewCall::new(1, 1, 2)).await.unwrap();
    store.insert(NewCall::new(2, 2, 3)).await.unwrap();

    store
        .update_field(1, CallField::DestinationFloor(9))
        .await
        .unwrap();

    assert_eq!(store.last_destination_floor().await.unwrap(), Some(3));
}

#[tokio::test]
async fn test_create_schema_is_idempotent() {
    let store = memory_store().await;
    store.insert(NewCall::new(0, 0, 1)).await.unwrap();

    store.create_schema().await.unwrap();
    store.create_schema().await.unwrap();

    assert_eq!(elevator_table_count(store.pool()).await, 1);
    assert_eq!(column_names(store.pool()).await, COLUMNS);
    assert_eq!(store.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_reset_schema_wipes_data() {
    let store = memory_store().await;
    for floor in 0..5 {
        store.insert(NewCall::new(floor, floor, floor + 1)).await.unwrap();
    }

    store.reset_schema().await.unwrap();

    assert!(store.get_all().await.unwrap().is_empty());
    assert_eq!(column_names(store.pool()).await, COLUMNS);

    store.insert(NewCall::new(4, 4, 0)).await.unwrap();
    assert_eq!(store.get_all().await.unwrap()[0].id, 1);
}

#[tokio::test]
async fn test_insert_keeps_given_timestamp() {
    let store = memory_store().await;
    store
        .insert(NewCall::new(2, 2, 6).at(ts("2023-11-05 17:45:09")))
        .await
        .unwrap();

    let rows = store.get_all().await.unwrap();
    assert_eq!(rows[0].call_datetime, ts("2023-11-05 17:45:09"));
}

#[tokio::test]
async fn test_insert_stamps_current_time() {
    let store = memory_store().await;
    let before = CallTimestamp::now();
    store.insert(NewCall::new(2, 2, 6)).await.unwrap();
    let after = CallTimestamp::now();

    let stamped = store.get_all().await.unwrap()[0].call_datetime;
    assert!(before <= stamped && stamped <= after);
}

#[tokio::test]
async fn test_row_exists() {
    let store = memory_store().await;
    store.insert(NewCall::new(0, 0, 1)).await.unwrap();

    assert!(store.row_exists(1).await.unwrap());
    assert!(!store.row_exists(2).await.unwrap());
    assert!(!store.row_exists(0).await.unwrap());
}

#[tokio::test]
async fn test_update_field_isolation() {
    let store = memory_store().await;
    store
        .insert(NewCall::new(0, 0, 4).at(ts("2024-01-01 10:00:00")))
        .await
        .unwrap();
    store
        .insert(NewCall::new(4, 2, 1).at(ts("2024-01-01 10:05:00")))
        .await
        .unwrap();
    let before = store.get_all().await.unwrap();

    store.update_field(2, CallField::DemandFloor(99)).await.unwrap();

    let after = store.get_all().await.unwrap();
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1].demand_floor, 99);
    assert_eq!(after[1].current_floor, before[1].current_floor);
    assert_eq!(after[1].destination_floor, before[1].destination_floor);
    assert_eq!(after[1].call_datetime, before[1].call_datetime);
    assert!(store.row_exists(2).await.unwrap());
}

#[tokio::test]
async fn test_update_every_field() {
    let store = memory_store().await;
    store.insert(NewCall::new(0, 0, 4)).await.unwrap();

    for field in [
        CallField::CurrentFloor(7),
        CallField::DemandFloor(8),
        CallField::DestinationFloor(-1),
        CallField::CallDatetime(ts("2022-06-30 23:59:59")),
    ] {
        store.update_field(1, field).await.unwrap();
    }

    let row = &store.get_all().await.unwrap()[0];
    assert_eq!(
        (row.current_floor, row.demand_floor, row.destination_floor),
        (7, 8, -1)
    );
    assert_eq!(row.call_datetime, ts("2022-06-30 23:59:59"));
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let store = memory_store().await;
    store.insert(NewCall::new(0, 0, 4)).await.unwrap();
    let before = store.get_all().await.unwrap();

    let err = store
        .update_field(42, CallField::CurrentFloor(3))
        .await
        .unwrap_err();

    assert_eq!(err, DomainError::row_not_found(42));
    assert_eq!(store.get_all().await.unwrap(), before);
}

#[tokio::test]
async fn test_delete_all_preserves_schema() {
    let store = memory_store().await;
    store.insert(NewCall::new(0, 0, 4)).await.unwrap();
    store.insert(NewCall::new(4, 1, 2)).await.unwrap();

    assert_eq!(store.delete_all().await.unwrap(), 2);
    assert!(store.get_all().await.unwrap().is_empty());
    assert_eq!(store.last_destination_floor().await.unwrap(), None);

    store.insert(NewCall::new(5, 5, 1)).await.unwrap();
    let rows = store.get_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    // AUTOINCREMENT never hands out an id twice
    assert_eq!(rows[0].id, 3);
}

#[tokio::test]
async fn test_operations_without_schema_fail() {
    let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
    let store = SqliteCallStore::new(pool);

    let err = store.insert(NewCall::new(0, 0, 1)).await.unwrap_err();
    assert!(matches!(err, DomainError::Storage(_)));
    assert!(matches!(
        store.last_destination_floor().await,
        Err(DomainError::Storage(_))
    ));
}

#[tokio::test]
async fn test_closed_store_reports_storage_error() {
    let store = memory_store().await;
    store.close().await;

    assert!(matches!(store.get_all().await, Err(DomainError::Storage(_))));
}

#[tokio::test]
async fn test_file_database_survives_reopen() {
    let db = TestDb::new();

    let store = db.open().await;
    store.create_schema().await.unwrap();
    store.insert(NewCall::new(1, 1, 6)).await.unwrap();
    store.close().await;

    let reopened = db.open().await;
    reopened.create_schema().await.unwrap();
    assert_eq!(reopened.last_destination_floor().await.unwrap(), Some(6));
    reopened.close().await;
}

#[tokio::test]
async fn test_malformed_external_timestamp_is_storage_error() {
    let store = memory_store().await;
    sqlx::query(
        "INSERT INTO elevator (current_floor, demand_floor, destination_floor, call_datetime) \
         VALUES (1, 1, 2, 'last tuesday')",
    )
    .execute(store.pool())
    .await
    .unwrap();

    assert!(matches!(store.get_all().await, Err(DomainError::Storage(_))));
    // the floor itself is still readable
    assert_eq!(store.last_destination_floor().await.unwrap(), Some(2));
}

#[tokio::test]
async fn test_update_fields_is_all_or_nothing() {
    let store = memory_store().await;
    store
        .insert(NewCall::new(0, 0, 4).at(ts("2024-01-01 10:00:00")))
        .await
        .unwrap();
    sqlx::query(
        "CREATE TRIGGER freeze_call_datetime BEFORE UPDATE OF call_datetime ON elevator \
         BEGIN SELECT RAISE(ABORT, 'call_datetime is frozen'); END",
    )
    .execute(store.pool())
    .await
    .unwrap();
    let before = store.get_all().await.unwrap();

    let err = store
        .update_fields(
            1,
            vec![
                CallField::CurrentFloor(7),
                CallField::CallDatetime(ts("2024-02-01 00:00:00")),
            ],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Storage(_)));
    assert_eq!(store.get_all().await.unwrap(), before);
}

#[tokio::test]
async fn test_update_fields_commits_together() {
    let store = memory_store().await;
    store.insert(NewCall::new(0, 0, 4)).await.unwrap();

    store
        .update_fields(
            1,
            vec![CallField::DemandFloor(2), CallField::DestinationFloor(8)],
        )
        .await
        .unwrap();

    let row = &store.get_all().await.unwrap()[0];
    assert_eq!((row.current_floor, row.demand_floor, row.destination_floor), (0, 2, 8));

    let err = store
        .update_fields(5, vec![CallField::DemandFloor(1)])
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::row_not_found(5));
}
