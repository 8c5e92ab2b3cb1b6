//! Workspace service

use crate::error::ApiError;
use crate::repositories::{WorkspaceMemberRecord, WorkspaceRecord, WorkspaceRepository};
use sqlx::PgPool;
use uuid::Uuid;

/// Workspace service for business logic
pub struct WorkspaceService;

impl WorkspaceService {
    /// Create a workspace; the creator becomes its sole admin member
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        name: &str,
    ) -> Result<(WorkspaceRecord, WorkspaceMemberRecord), ApiError> {
        WorkspaceRepository::create_with_owner(pool, owner_id, name)
            .await
            .map_err(ApiError::Internal)
    }

    /// List the workspaces the user is a member of, with their member sets
    pub async fn list_mine(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<(WorkspaceRecord, Vec<WorkspaceMemberRecord>)>, ApiError> {
        let workspaces = WorkspaceRepository::list_for_member(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        let mut result = Vec::with_capacity(workspaces.len());
        for workspace in workspaces {
            let members = WorkspaceRepository::members(pool, workspace.id)
                .await
                .map_err(ApiError::Internal)?;
            result.push((workspace, members));
        }

        Ok(result)
    }
}
