//! HTTP client for the folio API.
//!
//! This module provides the request-sending facility shared by the session
//! manager and the content API. It owns the base address and stamps the
//! current bearer token onto every outgoing request.

mod client;
pub mod endpoints;

pub use client::{ApiClient, DEFAULT_REQUEST_TIMEOUT};
