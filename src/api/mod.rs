//! HTTP layer for request/response handling.
//!
//! This layer translates HTTP requests into coordinator calls and formats
//! responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
