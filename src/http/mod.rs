//! Authenticated JSON-over-HTTPS client shared by every resource service.

mod client;

pub use client::ApiClient;
