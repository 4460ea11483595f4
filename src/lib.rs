//! SmartQueue API Library
//!
//! This library provides the core functionality for the SmartQueue API,
//! including the wait-time prediction workflow, domain logic, repositories,
//! and infrastructure components.

pub mod api;
pub mod config;
pub mod domain;
pub mod forecast;
pub mod infrastructure;
