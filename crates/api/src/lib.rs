//! Shop Catalog API library.
//!
//! Category CRUD over `PostgreSQL`, exposed as a JSON REST API. The crate is a
//! library so the router can be tested and the store reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
