//! Postgres repository implementation using Diesel.
//!
//! Entities are stored as opaque JSONB documents, one table per resource;
//! the only column this layer interprets is the generated `id`.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Automatic migration execution at startup
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use serde_json::Value;
use std::time::Duration;
use tokio::task;

use super::super::repository::{
    AircraftRepository, ErrorContext, FullRepository, RepositoryError, RepositoryResult,
    TaskRepository,
};
use crate::models::{AircraftId, MutationResult, Payload, TaskId};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
    /// - `PG_POOL_MAX`, `PG_POOL_MIN`, `PG_CONN_TIMEOUT_SEC`,
    ///   `PG_IDLE_TIMEOUT_SEC`, `PG_MAX_RETRIES`, `PG_RETRY_DELAY_MS`
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        Ok(Self {
            database_url,
            max_pool_size: env_parsed("PG_POOL_MAX", 10),
            min_pool_size: env_parsed("PG_POOL_MIN", 1),
            connection_timeout_sec: env_parsed("PG_CONN_TIMEOUT_SEC", 30),
            idle_timeout_sec: env_parsed("PG_IDLE_TIMEOUT_SEC", 600),
            max_retries: env_parsed("PG_MAX_RETRIES", 3),
            retry_delay_ms: env_parsed("PG_RETRY_DELAY_MS", 100),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Diesel-backed repository for Postgres.
///
/// Connections come from a bounded r2d2 pool; every operation runs on the
/// blocking thread pool and retries transient failures with exponential
/// backoff.
#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    ///
    /// # Arguments
    /// * `config` - Database configuration
    ///
    /// # Returns
    /// * `Ok(PostgresRepository)` on success
    /// * `Err(RepositoryError)` if connection or migration fails
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true) // Validate connections before use
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        // Run migrations once during initialization
        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool, config })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a database operation with automatic retry for transient failures.
    ///
    /// Retries up to `max_retries` times when a retryable error occurs
    /// (connection errors, serialization failures), doubling the delay each
    /// attempt.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2;
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1))
                                .retryable(),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        return Err(err);
                    }
                };

                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }

            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

#[async_trait]
impl AircraftRepository for PostgresRepository {
    async fn fetch_all_aircraft(&self) -> RepositoryResult<Vec<Value>> {
        self.with_conn(|conn| {
            let rows = aircraft::table
                .order(aircraft::id.asc())
                .load::<AircraftRow>(conn)
                .map_err(RepositoryError::from)?;
            Ok(rows.into_iter().map(AircraftRow::into_entity).collect())
        })
        .await
    }

    async fn fetch_aircraft_by_id(&self, id: AircraftId) -> RepositoryResult<Option<Value>> {
        self.with_conn(move |conn| {
            let row = aircraft::table
                .filter(aircraft::id.eq(id.value()))
                .first::<AircraftRow>(conn)
                .optional()
                .map_err(RepositoryError::from)?;
            Ok(row.map(AircraftRow::into_entity))
        })
        .await
    }

    async fn create_aircraft(&self, payload: Payload) -> RepositoryResult<Value> {
        self.with_conn(move |conn| {
            let row: AircraftRow = diesel::insert_into(aircraft::table)
                .values(NewAircraftRow {
                    data: Value::Object(payload.clone()),
                })
                .get_result(conn)
                .map_err(RepositoryError::from)?;
            Ok(row.into_entity())
        })
        .await
    }

    async fn update_aircraft(
        &self,
        id: AircraftId,
        payload: Payload,
    ) -> RepositoryResult<MutationResult> {
        self.with_conn(move |conn| {
            let affected = diesel::update(aircraft::table.filter(aircraft::id.eq(id.value())))
                .set(aircraft::data.eq(Value::Object(payload.clone())))
                .execute(conn)
                .map_err(RepositoryError::from)?;
            Ok(MutationResult::new(affected as u64))
        })
        .await
    }

    async fn delete_aircraft(&self, id: AircraftId) -> RepositoryResult<MutationResult> {
        self.with_conn(move |conn| {
            let affected = diesel::delete(aircraft::table.filter(aircraft::id.eq(id.value())))
                .execute(conn)
                .map_err(RepositoryError::from)?;
            Ok(MutationResult::new(affected as u64))
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresRepository {
    async fn fetch_all_tasks(&self) -> RepositoryResult<Vec<Value>> {
        self.with_conn(|conn| {
            let rows = tasks::table
                .order(tasks::id.asc())
                .load::<TaskRow>(conn)
                .map_err(RepositoryError::from)?;
            Ok(rows.into_iter().map(TaskRow::into_entity).collect())
        })
        .await
    }

    async fn fetch_task_by_id(&self, id: TaskId) -> RepositoryResult<Option<Value>> {
        self.with_conn(move |conn| {
            let row = tasks::table
                .filter(tasks::id.eq(id.value()))
                .first::<TaskRow>(conn)
                .optional()
                .map_err(RepositoryError::from)?;
            Ok(row.map(TaskRow::into_entity))
        })
        .await
    }

    async fn create_task(&self, payload: Payload) -> RepositoryResult<Value> {
        self.with_conn(move |conn| {
            let row: TaskRow = diesel::insert_into(tasks::table)
                .values(NewTaskRow {
                    data: Value::Object(payload.clone()),
                })
                .get_result(conn)
                .map_err(RepositoryError::from)?;
            Ok(row.into_entity())
        })
        .await
    }

    async fn update_task(&self, id: TaskId, payload: Payload) -> RepositoryResult<MutationResult> {
        self.with_conn(move |conn| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(id.value())))
                .set(tasks::data.eq(Value::Object(payload.clone())))
                .execute(conn)
                .map_err(RepositoryError::from)?;
            Ok(MutationResult::new(affected as u64))
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> RepositoryResult<MutationResult> {
        self.with_conn(move |conn| {
            let affected = diesel::delete(tasks::table.filter(tasks::id.eq(id.value())))
                .execute(conn)
                .map_err(RepositoryError::from)?;
            Ok(MutationResult::new(affected as u64))
        })
        .await
    }
}

#[async_trait]
impl FullRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map_err(RepositoryError::from)?;
            Ok(true)
        })
        .await
    }
}
