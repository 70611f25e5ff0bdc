//! Role-based job board: employers post jobs, applicants apply with a
//! resume and cover letter, and employers review the applications.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod storage;

pub use api::Services;
