//! Prism Admin library.
//!
//! Backend for the Prism preset store's admin console: JSON API for
//! managing Lightroom presets and viewing orders, bearer-token
//! authentication, and an email-based password reset flow.
//!
//! The binary in `main.rs` wires this into an HTTP server; the CLI crate
//! reuses the repositories and password hashing for user management.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
