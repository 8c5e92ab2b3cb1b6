//! Workspace API routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::repositories::{WorkspaceMemberRecord, WorkspaceRecord};
use crate::services::WorkspaceService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use syncflow_shared::types::{
    CreateWorkspaceRequest, WorkspaceMemberResponse, WorkspaceResponse,
};
use validator::Validate;

/// Create workspace routes
pub fn workspace_routes() -> Router<AppState> {
    Router::new().route("/", post(create_workspace).get(list_workspaces))
}

fn to_response(workspace: WorkspaceRecord, members: Vec<WorkspaceMemberRecord>) -> WorkspaceResponse {
    WorkspaceResponse {
        id: workspace.id.to_string(),
        name: workspace.name,
        owner_id: workspace.owner_id.to_string(),
        members: members
            .into_iter()
            .map(|m| WorkspaceMemberResponse {
                id: m.id.to_string(),
                user_id: m.user_id.to_string(),
                role: m.role.parse().unwrap_or_default(),
            })
            .collect(),
        created_at: workspace.created_at,
    }
}

/// POST /api/workspaces - Create a workspace
///
/// The creator is stored as owner and gets the single admin membership.
async fn create_workspace(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateWorkspaceRequest>,
) -> ApiResult<(StatusCode, Json<WorkspaceResponse>)> {
    req.validate()?;

    let (workspace, member) = WorkspaceService::create(state.db(), auth.user_id, &req.name).await?;

    Ok((
        StatusCode::CREATED,
        Json(to_response(workspace, vec![member])),
    ))
}

/// GET /api/workspaces - List workspaces the caller is a member of
async fn list_workspaces(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<WorkspaceResponse>>> {
    let workspaces = WorkspaceService::list_mine(state.db(), auth.user_id).await?;

    Ok(Json(
        workspaces
            .into_iter()
            .map(|(workspace, members)| to_response(workspace, members))
            .collect(),
    ))
}
