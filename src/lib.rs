#![doc = "The `taskgate` library crate."]
#![doc = ""]
#![doc = "Registration, login and per-user task CRUD over actix-web. Passwords are stored"]
#![doc = "as salted bcrypt digests and sessions are stateless HS256 tokens with a fixed"]
#![doc = "time-to-live. The binary (`main.rs`) loads `Config`, connects the Postgres store"]
#![doc = "and mounts `routes::config`."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use crate::config::Config;
pub use crate::error::AppError;
