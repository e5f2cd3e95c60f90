use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::{Map, Value};

use super::schema::{aircraft, tasks};

/// Merge the generated id into the stored payload to form the API entity.
///
/// Payloads are stored as opaque JSONB objects; the `id` column is the only
/// attribute this layer owns, so it is stitched back in on the way out.
pub fn entity_from_parts(id: i64, data: Value) -> Value {
    let mut map = match data {
        Value::Object(map) => map,
        // Non-object payloads should not occur, but keep them addressable
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    map.insert("id".to_string(), Value::from(id));
    Value::Object(map)
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = aircraft)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)] // created_at is used only for database operations
pub struct AircraftRow {
    pub id: i64,
    pub data: Value,
    pub created_at: DateTime<Utc>,
}

impl AircraftRow {
    pub fn into_entity(self) -> Value {
        entity_from_parts(self.id, self.data)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = aircraft)]
pub struct NewAircraftRow {
    pub data: Value,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)] // created_at is used only for database operations
pub struct TaskRow {
    pub id: i64,
    pub data: Value,
    pub created_at: DateTime<Utc>,
}

impl TaskRow {
    pub fn into_entity(self) -> Value {
        entity_from_parts(self.id, self.data)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    pub data: Value,
}
