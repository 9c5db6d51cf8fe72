//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod clans;
pub mod donators;
pub mod health;
pub mod kickpoints;
pub mod members;
pub mod players;
pub mod transfers;
