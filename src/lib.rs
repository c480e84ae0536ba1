//! sabersql - create a MySQL schema and bulk-load data through the `mysql`
//! command-line client.
//!
//! This library exposes the core modules for use by the binary and in
//! integration tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod logging;
