//! Core types, the storage trait and the grading service for the alumnos
//! student-records system.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod catalog;
pub mod error;
pub mod grades;
pub mod pending;
pub mod service;
pub mod store;
pub mod student;

pub use error::{Error, ErrorKind, Result};
pub use service::GradeBook;
