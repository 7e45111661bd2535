//! Core types, store traits, and engines for the Slate classroom backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod answer;
pub mod artifact;
pub mod assignment;
pub mod class;
pub mod engine;
pub mod error;
pub mod identity;
pub mod store;

pub use error::{Error, Result};
