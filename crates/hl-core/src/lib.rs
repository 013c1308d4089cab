//! Host lookup orchestration: fan a lookup request out to per-service work
//! units on an asynchronous worker pool, then fan the outcomes back in as
//! one ordered answer. Task status and result queries are served separately
//! by handle.

pub mod error;
pub mod models;
pub mod services;

pub use error::{LookupError, Result};
