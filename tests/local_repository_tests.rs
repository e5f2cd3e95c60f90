//! Tests for the in-memory LocalRepository: id assignment, mutation counts,
//! listing order, and behavior under concurrent access.

use std::sync::Arc;

use fleet_rust::db::repository::{AircraftRepository, FullRepository, TaskRepository};
use fleet_rust::db::LocalRepository;
use fleet_rust::models::{AircraftId, Payload, TaskId};
use serde_json::{json, Value};

fn payload(v: Value) -> Payload {
    match v {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {other}"),
    }
}

#[tokio::test]
async fn resources_have_independent_id_sequences() {
    let repo = LocalRepository::new();

    let aircraft = repo
        .create_aircraft(payload(json!({"tail_number": "EC-MYT"})))
        .await
        .unwrap();
    let task = repo
        .create_task(payload(json!({"title": "A-check"})))
        .await
        .unwrap();

    assert_eq!(aircraft["id"], json!(1));
    assert_eq!(task["id"], json!(1));
}

#[tokio::test]
async fn deleted_ids_are_not_reused() {
    let repo = LocalRepository::new();

    repo.create_task(payload(json!({"title": "a"}))).await.unwrap();
    repo.delete_task(TaskId::new(1)).await.unwrap();
    let next = repo.create_task(payload(json!({"title": "b"}))).await.unwrap();

    assert_eq!(next["id"], json!(2));
}

#[tokio::test]
async fn fetch_all_lists_rows_in_ascending_id_order() {
    let repo = LocalRepository::new();

    for i in 0..5 {
        repo.create_aircraft(payload(json!({"n": i}))).await.unwrap();
    }

    let all = repo.fetch_all_aircraft().await.unwrap();
    let ids: Vec<i64> = all.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn mutation_counts_reflect_matched_rows() {
    let repo = LocalRepository::new();

    repo.create_aircraft(payload(json!({"status": "active"})))
        .await
        .unwrap();

    let hit = repo
        .update_aircraft(AircraftId::new(1), payload(json!({"status": "grounded"})))
        .await
        .unwrap();
    let miss = repo
        .update_aircraft(AircraftId::new(2), payload(json!({"status": "grounded"})))
        .await
        .unwrap();
    assert_eq!(hit.affected_rows, 1);
    assert_eq!(miss.affected_rows, 0);

    let deleted = repo.delete_aircraft(AircraftId::new(1)).await.unwrap();
    let missing = repo.delete_aircraft(AircraftId::new(1)).await.unwrap();
    assert_eq!(deleted.affected_rows, 1);
    assert_eq!(missing.affected_rows, 0);
}

#[tokio::test]
async fn concurrent_creates_assign_unique_ids() {
    let repo = Arc::new(LocalRepository::new());

    let mut handles = vec![];
    for i in 0..16 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.create_task(payload(json!({"title": format!("task-{i}")})))
                .await
                .unwrap()
        }));
    }

    let mut ids = vec![];
    for handle in handles {
        let created = handle.await.unwrap();
        ids.push(created["id"].as_i64().unwrap());
    }

    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 16, "every create got a distinct id");

    let all = repo.fetch_all_tasks().await.unwrap();
    assert_eq!(all.len(), 16);
}

#[tokio::test]
async fn concurrent_reads_and_writes_do_not_interfere() {
    let repo = Arc::new(LocalRepository::new());

    repo.create_aircraft(payload(json!({"tail_number": "EC-MYT"})))
        .await
        .unwrap();

    let mut handles = vec![];
    for _ in 0..8 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            for _ in 0..10 {
                let row = repo
                    .fetch_aircraft_by_id(AircraftId::new(1))
                    .await
                    .unwrap()
                    .expect("row stays present");
                assert_eq!(row["tail_number"], json!("EC-MYT"));
            }
        }));
    }
    for _ in 0..8 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            for _ in 0..10 {
                repo.create_aircraft(payload(json!({"tail_number": "EC-NBX"})))
                    .await
                    .unwrap();
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(repo.fetch_all_aircraft().await.unwrap().len(), 81);
    assert!(repo.health_check().await.unwrap());
}
