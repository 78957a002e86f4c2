//! Client for the NAKIVO Director JSON-RPC router.
//!
//! [`NakivoApi`] is the read-only capability the collectors depend on;
//! [`NakivoClient`] implements it over HTTP with a cookie-backed session.

mod api;
pub use api::NakivoApi;

mod client;
pub use client::NakivoClient;

mod config;
pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_PORT, DEFAULT_TIMEOUT};

mod errors;
pub use errors::ClientError;

pub use nakivo_model as model;
