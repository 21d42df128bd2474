//! Core types shared by the rolegate crates.
//!
//! This crate provides the `Result` alias used across the workspace and
//! [`RoutePath`], the normalized form of a request path that route
//! classification operates on.

pub mod error;
pub mod path;

pub use error::Result;
pub use path::RoutePath;
