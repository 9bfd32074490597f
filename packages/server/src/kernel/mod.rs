//! Kernel module - infrastructure shared by every domain.

pub mod database;

pub use database::{DbError, FromRecord, QueryRouter, Row, SqlValue};
