//! SQLite backend for the alumnos grade store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Multi-row writes run inside a single
//! SQLite transaction on that thread.

mod encode;
mod schema;
mod seed;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use seed::{COURSE_ID, SEMESTERS, SUBJECTS};
pub use store::SqliteStore;
