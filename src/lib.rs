//! Multi-tenant bucket list API: users register, log in for a short-lived
//! token and manage their own buckets and items over JSON.

pub mod config;
pub mod db;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
