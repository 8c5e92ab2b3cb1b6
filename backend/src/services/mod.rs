//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories, the session cache, and the token issuer.

pub mod auth;
pub mod task;
pub mod workspace;

pub use auth::AuthService;
pub use task::TaskService;
pub use workspace::WorkspaceService;
