//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod task;
pub mod user;
pub mod workspace;

pub use task::{TaskRecord, TaskRepository, UpdateTask};
pub use user::{UserRecord, UserRepository};
pub use workspace::{WorkspaceMemberRecord, WorkspaceRecord, WorkspaceRepository};
