pub mod dto;
pub mod handlers;
pub mod models;
pub mod password;
pub mod service;

// Re-export commonly used types
pub use models::{LoginRequest, RegisterRequest};
pub use service::AccountService;
