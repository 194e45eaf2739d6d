//! Core types and trait definitions for the abridge summary service.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! store, API, and server crates all depend on it.

pub mod error;
pub mod provider;
pub mod ratio;
pub mod store;
pub mod summary;

pub use error::{Error, Result};
