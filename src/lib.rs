#![doc = "The `taskdash` library crate."]
#![doc = ""]
#![doc = "Backend of a small dashboard: account signup and login with signed tokens,"]
#![doc = "onboarding, mocked analytics, and a personal task list whose every read and"]
#![doc = "write is scoped to the authenticated owner. The `client` module drives the"]
#![doc = "same API from Rust. The binary (`main.rs`) wires it all into an HTTP server."]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
