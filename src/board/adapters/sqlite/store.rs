//! `SQLite` task store implementation using Diesel ORM.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::board::{
    domain::{
        DayOfWeek, NewTask, OwnerId, PersistedTaskData, Priority, Task, TaskId, TaskPatch,
        TaskStatus, WeekId,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use uuid::Uuid;

/// `SQLite` connection pool type used by the task store.
pub type TaskSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Schema bootstrap statement, run once when a store is opened.
const CREATE_TASKS_TABLE: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    day TEXT NOT NULL,
    status TEXT NOT NULL,
    priority TEXT NOT NULL,
    owner TEXT NOT NULL,
    week_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

/// `SQLite`-backed task store.
///
/// The embedded native backend: persists tasks to a local database file and
/// normalises the stored text representations back into domain types at the
/// adapter boundary.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore<C = DefaultClock> {
    pool: TaskSqlitePool,
    clock: Arc<C>,
}

impl SqliteTaskStore {
    /// Opens a store over the database at the given path, creating the
    /// schema when absent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Backend`] when the pool cannot be built or
    /// the schema bootstrap fails.
    pub fn open(database_url: &str) -> TaskStoreResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .build(manager)
            .map_err(TaskStoreError::backend)?;
        Self::from_pool(pool, Arc::new(DefaultClock))
    }

    /// Opens a store over a private in-memory database.
    ///
    /// The pool is capped at a single connection: an in-memory `SQLite`
    /// database lives and dies with its connection, so the pool must hold
    /// exactly one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Backend`] when the pool cannot be built or
    /// the schema bootstrap fails.
    pub fn open_in_memory() -> TaskStoreResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(TaskStoreError::backend)?;
        Self::from_pool(pool, Arc::new(DefaultClock))
    }
}

impl<C> SqliteTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a store from an existing pool and clock, bootstrapping the
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Backend`] when a connection cannot be
    /// checked out or the schema bootstrap fails.
    pub fn from_pool(pool: TaskSqlitePool, clock: Arc<C>) -> TaskStoreResult<Self> {
        let mut connection = pool.get().map_err(TaskStoreError::backend)?;
        diesel::sql_query(CREATE_TASKS_TABLE)
            .execute(&mut connection)
            .map_err(TaskStoreError::backend)?;
        drop(connection);
        Ok(Self { pool, clock })
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::backend)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::backend)?
    }
}

#[async_trait]
impl<C> TaskStore for SqliteTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn add_task(
        &self,
        owner: &OwnerId,
        week: WeekId,
        draft: NewTask,
    ) -> TaskStoreResult<TaskId> {
        let task = Task::create(owner.clone(), week, draft, &*self.clock);
        let task_id = task.id();
        let row = task_to_new_row(&task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(TaskStoreError::backend)?;
            Ok(())
        })
        .await?;
        Ok(task_id)
    }

    async fn tasks_for_week(&self, owner: &OwnerId, week: WeekId) -> TaskStoreResult<Vec<Task>> {
        let owner_key = owner.as_str().to_owned();
        let week_key = week.to_string();

        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::week_id.eq(week_key))
                .filter(tasks::owner.eq(owner_key))
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::backend)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let changeset = patch_to_changeset(&patch, self.clock.utc());

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(id.to_string())))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskStoreError::backend)?;
            if updated == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.to_string())))
                .execute(connection)
                .map_err(TaskStoreError::backend)?;
            if deleted == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn task_to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().to_string(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        day: task.day().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        owner: task.owner().as_str().to_owned(),
        week_id: task.week().to_string(),
        created_at: task.created_at().to_rfc3339(),
        updated_at: task.updated_at().to_rfc3339(),
    }
}

fn patch_to_changeset(patch: &TaskPatch, updated_at: DateTime<Utc>) -> TaskChangeset {
    TaskChangeset {
        title: patch.title().map(str::to_owned),
        description: patch.description().map(str::to_owned),
        day: patch.day().map(|day| day.as_str().to_owned()),
        status: patch.status().map(|status| status.as_str().to_owned()),
        priority: patch.priority().map(|priority| priority.as_str().to_owned()),
        updated_at: Some(updated_at.to_rfc3339()),
    }
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        day,
        status,
        priority,
        owner,
        week_id,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(Uuid::parse_str(&id).map_err(TaskStoreError::backend)?),
        title,
        description,
        day: DayOfWeek::try_from(day.as_str()).map_err(TaskStoreError::backend)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskStoreError::backend)?,
        priority: Priority::try_from(priority.as_str()).map_err(TaskStoreError::backend)?,
        owner: OwnerId::new(owner).map_err(TaskStoreError::backend)?,
        week: WeekId::from_iso(&week_id).map_err(TaskStoreError::backend)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    };
    Ok(Task::from_persisted(data))
}

fn parse_timestamp(value: &str) -> TaskStoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(TaskStoreError::backend)
}
