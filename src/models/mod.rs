//! Core data models for the bucket list service.
//!
//! Each entity maps to one SQLite table via `sqlx::FromRow`. Buckets and
//! items serialize with the field names clients of the JSON API expect.

pub mod bucket;
pub mod item;
pub mod user;
