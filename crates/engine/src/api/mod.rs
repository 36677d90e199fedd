//! HTTP API layer.

pub mod http;
