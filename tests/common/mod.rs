//! Shared models and helpers for integration tests.

#![allow(dead_code)]

pub mod models;
pub mod strategies;

pub use models::*;
pub use strategies::*;
