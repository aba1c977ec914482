//! The storefront's HTTP contract.
//!
//! [`StoreClient`] knows every endpoint, verb and payload shape; the
//! [`Transport`] underneath is whatever HTTP stack the host provides
//! (browser `fetch`, `reqwest`, or the in-memory fake backend).

mod client;
mod transport;

pub use client::StoreClient;
pub use transport::{ApiRequest, ApiResponse, Method, Transport};
