//! Task repository for database operations
//!
//! Every read/update/delete is scoped by `(id, owner_id)` in one query so a
//! task owned by someone else is indistinguishable from a missing one.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Task record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for updating a task; None leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

/// Task repository for database operations
pub struct TaskRepository;

impl TaskRepository {
    /// Create a task owned by `owner_id`
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        title: &str,
        description: Option<&str>,
        is_completed: bool,
    ) -> Result<TaskRecord> {
        let task = sqlx::query_as::<_, TaskRecord>(
            r#"
            INSERT INTO tasks (title, description, is_completed, owner_id)
            VALUES ($1, COALESCE($2, ''), $3, $4)
            RETURNING id, title, description, is_completed, owner_id,
                      created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(is_completed)
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// List all tasks owned by a user, newest first
    pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<TaskRecord>> {
        let tasks = sqlx::query_as::<_, TaskRecord>(
            r#"
            SELECT id, title, description, is_completed, owner_id,
                   created_at, updated_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Update a task scoped to its owner.
    ///
    /// Returns None when no row matched — whether the task is missing or
    /// owned by someone else.
    pub async fn update_scoped(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
        updates: UpdateTask,
    ) -> Result<Option<TaskRecord>> {
        let task = sqlx::query_as::<_, TaskRecord>(
            r#"
            UPDATE tasks SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                is_completed = COALESCE($5, is_completed),
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, title, description, is_completed, owner_id,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(updates.title)
        .bind(updates.description)
        .bind(updates.is_completed)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Delete a task scoped to its owner. Returns whether a row was deleted.
    pub async fn delete_scoped(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    // Integration tests require database - see backend/tests/
}
