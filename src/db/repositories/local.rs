//! In-memory repository implementation.
//!
//! `LocalRepository` backs the default `local-repo` feature. It mimics the
//! relational store closely enough for the HTTP layer not to know the
//! difference: sequential id assignment, wholesale row replacement on
//! update, and affected-row counts for mutations.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;

use super::super::repository::{
    AircraftRepository, FullRepository, RepositoryResult, TaskRepository,
};
use crate::models::{AircraftId, MutationResult, Payload, TaskId};

/// One in-memory table: rows keyed by id, plus the next id to hand out.
///
/// A `BTreeMap` keeps listing order stable (ascending id), matching what a
/// `SELECT ... ORDER BY id` would return.
#[derive(Debug)]
struct Table {
    rows: BTreeMap<i64, Value>,
    next_id: i64,
}

impl Table {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn all(&self) -> Vec<Value> {
        self.rows.values().cloned().collect()
    }

    fn get(&self, id: i64) -> Option<Value> {
        self.rows.get(&id).cloned()
    }

    fn insert(&mut self, mut payload: Payload) -> Value {
        let id = self.next_id;
        self.next_id += 1;
        payload.insert("id".to_string(), Value::from(id));
        let entity = Value::Object(payload);
        self.rows.insert(id, entity.clone());
        entity
    }

    fn replace(&mut self, id: i64, mut payload: Payload) -> MutationResult {
        if !self.rows.contains_key(&id) {
            return MutationResult::none();
        }
        payload.insert("id".to_string(), Value::from(id));
        self.rows.insert(id, Value::Object(payload));
        MutationResult::new(1)
    }

    fn remove(&mut self, id: i64) -> MutationResult {
        match self.rows.remove(&id) {
            Some(_) => MutationResult::new(1),
            None => MutationResult::none(),
        }
    }
}

/// In-memory repository for unit testing and local development.
#[derive(Debug)]
pub struct LocalRepository {
    aircraft: RwLock<Table>,
    tasks: RwLock<Table>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            aircraft: RwLock::new(Table::new()),
            tasks: RwLock::new(Table::new()),
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AircraftRepository for LocalRepository {
    async fn fetch_all_aircraft(&self) -> RepositoryResult<Vec<Value>> {
        Ok(self.aircraft.read().all())
    }

    async fn fetch_aircraft_by_id(&self, id: AircraftId) -> RepositoryResult<Option<Value>> {
        Ok(self.aircraft.read().get(id.value()))
    }

    async fn create_aircraft(&self, payload: Payload) -> RepositoryResult<Value> {
        Ok(self.aircraft.write().insert(payload))
    }

    async fn update_aircraft(
        &self,
        id: AircraftId,
        payload: Payload,
    ) -> RepositoryResult<MutationResult> {
        Ok(self.aircraft.write().replace(id.value(), payload))
    }

    async fn delete_aircraft(&self, id: AircraftId) -> RepositoryResult<MutationResult> {
        Ok(self.aircraft.write().remove(id.value()))
    }
}

#[async_trait]
impl TaskRepository for LocalRepository {
    async fn fetch_all_tasks(&self) -> RepositoryResult<Vec<Value>> {
        Ok(self.tasks.read().all())
    }

    async fn fetch_task_by_id(&self, id: TaskId) -> RepositoryResult<Option<Value>> {
        Ok(self.tasks.read().get(id.value()))
    }

    async fn create_task(&self, payload: Payload) -> RepositoryResult<Value> {
        Ok(self.tasks.write().insert(payload))
    }

    async fn update_task(&self, id: TaskId, payload: Payload) -> RepositoryResult<MutationResult> {
        Ok(self.tasks.write().replace(id.value(), payload))
    }

    async fn delete_task(&self, id: TaskId) -> RepositoryResult<MutationResult> {
        Ok(self.tasks.write().remove(id.value()))
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> Payload {
        match v {
            Value::Object(map) => map,
            other => panic!("expected JSON object, got {other}"),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_per_resource() {
        let repo = LocalRepository::new();

        let first = repo
            .create_aircraft(payload(json!({"tail_number": "EC-MYT"})))
            .await
            .unwrap();
        let second = repo
            .create_aircraft(payload(json!({"tail_number": "EC-NBX"})))
            .await
            .unwrap();
        // Task ids count independently of aircraft ids
        let task = repo
            .create_task(payload(json!({"title": "A-check"})))
            .await
            .unwrap();

        assert_eq!(first["id"], json!(1));
        assert_eq!(second["id"], json!(2));
        assert_eq!(task["id"], json!(1));
    }

    #[tokio::test]
    async fn update_replaces_document_wholesale() {
        let repo = LocalRepository::new();
        repo.create_aircraft(payload(json!({"tail_number": "EC-MYT", "status": "active"})))
            .await
            .unwrap();

        let result = repo
            .update_aircraft(AircraftId::new(1), payload(json!({"tail_number": "EC-MYT"})))
            .await
            .unwrap();
        assert_eq!(result.affected_rows, 1);

        let stored = repo
            .fetch_aircraft_by_id(AircraftId::new(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored["tail_number"], json!("EC-MYT"));
        assert!(stored.get("status").is_none());
        assert_eq!(stored["id"], json!(1));
    }

    #[tokio::test]
    async fn mutations_on_unknown_ids_affect_zero_rows() {
        let repo = LocalRepository::new();
        let updated = repo
            .update_task(TaskId::new(99), payload(json!({"title": "x"})))
            .await
            .unwrap();
        let deleted = repo.delete_task(TaskId::new(99)).await.unwrap();
        assert!(!updated.matched_any());
        assert!(!deleted.matched_any());
    }
}
