//! Business logic behind the HTTP handlers, one service per concern.

pub mod account_service;
pub mod bucket_service;
pub mod token_service;
