//! HTTP transport for the recipe API.
//!
//! Every request the client makes goes through [`HttpClient`], so tests can
//! swap in [`MockClient`] and never touch the network.

mod client;

pub use client::{
    ApiRequest, ApiResponse, HttpClient, Method, MockClient, MockResponse, ReqwestClient,
    ReqwestClientBuilder,
};

/// Join a base URL and an absolute API path without doubling the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
