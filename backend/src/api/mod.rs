//! HTTP layer.
//!
//! This module provides the HTTP server and the HTML pages it renders.

pub mod pages;
pub mod server;

pub use server::{router, start_server, AppState};
