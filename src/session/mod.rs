// Public API - what other modules can use
pub use cleanup_task::{start_cleanup_task, CleanupConfig};
pub use handlers::{login, logout};
pub use middleware::jwt_auth;
pub use types::{LoginRequest, SessionClaims, SessionResponse};

// Internal modules
pub mod cleanup_task;
pub mod credentials;
mod handlers;
mod middleware;
pub mod models;
pub mod repository;
pub mod service;
pub mod token;
mod types;
