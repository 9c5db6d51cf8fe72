//! Integration test utilities for the clan server
//!
//! In-memory implementations of every repository and collaborator trait,
//! seeded fixtures, and helpers for driving the HTTP router in-process.

pub mod fixtures;
pub mod helpers;

pub use fakes::*;
pub use fixtures::*;
pub use helpers::*;
