//! Task API routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::repositories::{TaskRecord, UpdateTask};
use crate::services::task::{TaskInput, TaskService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use syncflow_shared::types::{CreateTaskRequest, MessageResponse, TaskResponse, UpdateTaskRequest};
use uuid::Uuid;
use validator::Validate;

/// Create task routes
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_task).get(list_tasks))
        .route("/:id", put(update_task).delete(delete_task))
}

fn to_response(task: TaskRecord) -> TaskResponse {
    TaskResponse {
        id: task.id.to_string(),
        title: task.title,
        description: task.description,
        is_completed: task.is_completed,
        owner_id: task.owner_id.to_string(),
        created_at: task.created_at,
        updated_at: task.updated_at,
    }
}

/// POST /api/tasks - Create a task
///
/// The owner is always the authenticated caller, never client input.
async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate()?;

    let input = TaskInput {
        title: req.title,
        description: req.description,
        is_completed: req.is_completed.unwrap_or(false),
    };

    let task = TaskService::create(state.db(), auth.user_id, input).await?;

    Ok((StatusCode::CREATED, Json(to_response(task))))
}

/// GET /api/tasks - List the caller's tasks
async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = TaskService::list(state.db(), auth.user_id).await?;
    Ok(Json(tasks.into_iter().map(to_response).collect()))
}

/// PUT /api/tasks/:id - Update an owned task
async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    req.validate()?;

    let updates = UpdateTask {
        title: req.title,
        description: req.description,
        is_completed: req.is_completed,
    };

    let task = TaskService::update(state.db(), auth.user_id, id, updates).await?;

    Ok(Json(to_response(task)))
}

/// DELETE /api/tasks/:id - Delete an owned task
async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    TaskService::delete(state.db(), auth.user_id, id).await?;

    Ok(Json(MessageResponse {
        message: "Task deleted".to_string(),
    }))
}
