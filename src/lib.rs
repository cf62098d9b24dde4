//! `pointfit` library crate.
//!
//! The binary (`pointfit`) is a thin wrapper around this library so that:
//!
//! - the fitting core is testable without a running server
//! - the HTTP service and the CLI share one implementation of `/api/fit`
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod client;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
pub mod server;
