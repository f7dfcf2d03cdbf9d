#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "Authentication (bcrypt credentials, JWT issuance and verification), per-user"]
#![doc = "task management, persistence collaborators, routing and error handling."]
#![doc = "The binary (`main.rs`) wires these together into an actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod tasks;

pub use crate::error::AppError;
