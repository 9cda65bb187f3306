//! HTTP networking module
//!
//! Provides the HTTP client used by the GitHub search transport.

mod client;

pub use client::{HttpClient, HttpRequest, HttpResponse};
