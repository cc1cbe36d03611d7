//! Campusfind library
//!
//! This library exposes the service internals for integration testing.
//! The main entry point for running the server is the `campusfind` binary.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod routes;
pub mod services;
pub mod state;
