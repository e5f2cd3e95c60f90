//! HTTP handlers for the REST API.
//!
//! One handler per endpoint, instantiating the same controller contract for
//! each resource: translate the request into a repository call, translate
//! the repository outcome into a status code and JSON body. Repository
//! failures are caught here, logged once with a controller/operation tag,
//! and surfaced as a generic 500; they never escape a handler.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use super::dto::{HealthResponse, MessageBody};
use super::error::AppError;
use super::state::AppState;
use crate::models::{AircraftId, Payload, TaskId};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Parse a path id segment, rejecting non-numeric input with a 400.
fn parse_id(raw: &str, resource: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("Invalid {resource} id")))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the database
/// is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let database = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        database,
    }))
}

// =============================================================================
// Aircraft
// =============================================================================

/// GET /aircraft
pub async fn list_aircraft(State(state): State<AppState>) -> HandlerResult<Vec<Value>> {
    match state.repository.fetch_all_aircraft().await {
        Ok(rows) => Ok(Json(rows)),
        Err(err) => {
            state
                .logger
                .error(&format!("[aircraft.controller][GetAircraft][Error] {err}"));
            Err(AppError::Internal("Failed to fetch aircraft".to_string()))
        }
    }
}

/// GET /aircraft/{id}
pub async fn get_aircraft(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Value> {
    let id = AircraftId::new(parse_id(&id, "aircraft")?);

    match state.repository.fetch_aircraft_by_id(id).await {
        Ok(Some(entity)) => Ok(Json(entity)),
        Ok(None) => Err(AppError::NotFound("Aircraft not found".to_string())),
        Err(err) => {
            state.logger.error(&format!(
                "[aircraft.controller][GetAircraftById][Error] {err}"
            ));
            Err(AppError::Internal("Failed to fetch aircraft".to_string()))
        }
    }
}

/// POST /aircraft
pub async fn create_aircraft(
    State(state): State<AppState>,
    Json(payload): Json<Payload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    match state.repository.create_aircraft(payload).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(err) => {
            state.logger.error(&format!(
                "[aircraft.controller][CreateAircraft][Error] {err}"
            ));
            Err(AppError::Internal("Failed to create aircraft".to_string()))
        }
    }
}

/// PUT /aircraft/{id}
pub async fn update_aircraft(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Payload>,
) -> HandlerResult<MessageBody> {
    let id = AircraftId::new(parse_id(&id, "aircraft")?);

    match state.repository.update_aircraft(id, payload).await {
        Ok(result) if result.matched_any() => {
            Ok(Json(MessageBody::new("Aircraft updated successfully")))
        }
        Ok(_) => Err(AppError::NotFound("Aircraft not found".to_string())),
        Err(err) => {
            state.logger.error(&format!(
                "[aircraft.controller][UpdateAircraft][Error] {err}"
            ));
            Err(AppError::Internal("Failed to update aircraft".to_string()))
        }
    }
}

/// DELETE /aircraft/{id}
pub async fn delete_aircraft(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<MessageBody> {
    let id = AircraftId::new(parse_id(&id, "aircraft")?);

    match state.repository.delete_aircraft(id).await {
        Ok(result) if result.matched_any() => {
            Ok(Json(MessageBody::new("Aircraft deleted successfully")))
        }
        Ok(_) => Err(AppError::NotFound("Aircraft not found".to_string())),
        Err(err) => {
            state.logger.error(&format!(
                "[aircraft.controller][DeleteAircraft][Error] {err}"
            ));
            Err(AppError::Internal("Failed to delete aircraft".to_string()))
        }
    }
}

// =============================================================================
// Tasks
// =============================================================================

/// GET /tasks
pub async fn list_tasks(State(state): State<AppState>) -> HandlerResult<Vec<Value>> {
    match state.repository.fetch_all_tasks().await {
        Ok(rows) => Ok(Json(rows)),
        Err(err) => {
            state
                .logger
                .error(&format!("[tasks.controller][GetTasks][Error] {err}"));
            Err(AppError::Internal("Failed to fetch tasks".to_string()))
        }
    }
}

/// GET /tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Value> {
    let id = TaskId::new(parse_id(&id, "task")?);

    match state.repository.fetch_task_by_id(id).await {
        Ok(Some(entity)) => Ok(Json(entity)),
        Ok(None) => Err(AppError::NotFound("Task not found".to_string())),
        Err(err) => {
            state
                .logger
                .error(&format!("[tasks.controller][GetTaskById][Error] {err}"));
            Err(AppError::Internal("Failed to fetch task".to_string()))
        }
    }
}

/// POST /tasks
pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<Payload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    match state.repository.create_task(payload).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(err) => {
            state
                .logger
                .error(&format!("[tasks.controller][CreateTask][Error] {err}"));
            Err(AppError::Internal("Failed to create task".to_string()))
        }
    }
}

/// PUT /tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Payload>,
) -> HandlerResult<MessageBody> {
    let id = TaskId::new(parse_id(&id, "task")?);

    match state.repository.update_task(id, payload).await {
        Ok(result) if result.matched_any() => {
            Ok(Json(MessageBody::new("Task updated successfully")))
        }
        Ok(_) => Err(AppError::NotFound("Task not found".to_string())),
        Err(err) => {
            state
                .logger
                .error(&format!("[tasks.controller][UpdateTask][Error] {err}"));
            Err(AppError::Internal("Failed to update task".to_string()))
        }
    }
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<MessageBody> {
    let id = TaskId::new(parse_id(&id, "task")?);

    match state.repository.delete_task(id).await {
        Ok(result) if result.matched_any() => {
            Ok(Json(MessageBody::new("Task deleted successfully")))
        }
        Ok(_) => Err(AppError::NotFound("Task not found".to_string())),
        Err(err) => {
            state
                .logger
                .error(&format!("[tasks.controller][DeleteTask][Error] {err}"));
            Err(AppError::Internal("Failed to delete task".to_string()))
        }
    }
}
