//! Shop Catalog Core - Shared types library.
//!
//! This crate provides common types used across all Shop Catalog components:
//! - `api` - Category REST API (library and server binary)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Enable the `postgres` feature to get `sqlx` encode/decode
//! support for the ID newtypes.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe entity IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
