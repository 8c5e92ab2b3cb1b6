//! Workspace and membership repository
//!
//! Workspace creation and the creator's admin membership are one logical
//! unit; both inserts run inside a single transaction so a failed
//! membership write can never leave an ownerless-looking workspace behind.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Workspace record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkspaceRecord {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Workspace membership record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkspaceMemberRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workspace_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Workspace repository for database operations
pub struct WorkspaceRepository;

impl WorkspaceRepository {
    /// Create a workspace together with its creator's admin membership
    pub async fn create_with_owner(
        pool: &PgPool,
        owner_id: Uuid,
        name: &str,
    ) -> Result<(WorkspaceRecord, WorkspaceMemberRecord)> {
        let mut tx = pool.begin().await?;

        let workspace = sqlx::query_as::<_, WorkspaceRecord>(
            r#"
            INSERT INTO workspaces (name, owner_id)
            VALUES ($1, $2)
            RETURNING id, name, owner_id, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        let member = sqlx::query_as::<_, WorkspaceMemberRecord>(
            r#"
            INSERT INTO workspace_members (user_id, workspace_id, role)
            VALUES ($1, $2, 'admin')
            RETURNING id, user_id, workspace_id, role, created_at
            "#,
        )
        .bind(owner_id)
        .bind(workspace.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((workspace, member))
    }

    /// List all workspaces a user has a membership in, newest first
    pub async fn list_for_member(pool: &PgPool, user_id: Uuid) -> Result<Vec<WorkspaceRecord>> {
        let workspaces = sqlx::query_as::<_, WorkspaceRecord>(
            r#"
            SELECT w.id, w.name, w.owner_id, w.created_at, w.updated_at
            FROM workspaces w
            INNER JOIN workspace_members m ON m.workspace_id = w.id
            WHERE m.user_id = $1
            ORDER BY w.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(workspaces)
    }

    /// List the memberships of a workspace
    pub async fn members(pool: &PgPool, workspace_id: Uuid) -> Result<Vec<WorkspaceMemberRecord>> {
        let members = sqlx::query_as::<_, WorkspaceMemberRecord>(
            r#"
            SELECT id, user_id, workspace_id, role, created_at
            FROM workspace_members
            WHERE workspace_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(workspace_id)
        .fetch_all(pool)
        .await?;

        Ok(members)
    }
}
