//! Task service
//!
//! Ownership-scoped CRUD. The owner id always comes from the verified
//! token, never from client input, and is stamped at creation.

use crate::error::ApiError;
use crate::repositories::{TaskRecord, TaskRepository, UpdateTask};
use sqlx::PgPool;
use uuid::Uuid;

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
}

/// Task service for business logic
pub struct TaskService;

impl TaskService {
    /// Create a task owned by the authenticated user
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        input: TaskInput,
    ) -> Result<TaskRecord, ApiError> {
        TaskRepository::create(
            pool,
            owner_id,
            &input.title,
            input.description.as_deref(),
            input.is_completed,
        )
        .await
        .map_err(ApiError::Internal)
    }

    /// List the authenticated user's tasks
    pub async fn list(pool: &PgPool, owner_id: Uuid) -> Result<Vec<TaskRecord>, ApiError> {
        TaskRepository::list_by_owner(pool, owner_id)
            .await
            .map_err(ApiError::Internal)
    }

    /// Update a task the authenticated user owns.
    ///
    /// A task that exists but belongs to someone else yields the same
    /// NotFound as a genuinely missing one.
    pub async fn update(
        pool: &PgPool,
        owner_id: Uuid,
        task_id: Uuid,
        updates: UpdateTask,
    ) -> Result<TaskRecord, ApiError> {
        TaskRepository::update_scoped(pool, task_id, owner_id, updates)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))
    }

    /// Delete a task the authenticated user owns
    pub async fn delete(pool: &PgPool, owner_id: Uuid, task_id: Uuid) -> Result<(), ApiError> {
        let deleted = TaskRepository::delete_scoped(pool, task_id, owner_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Task not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Integration tests require database - see backend/tests/
}
