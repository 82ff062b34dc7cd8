//! Tarot API Backend
//!
//! Access to the tarot HTTP API through a common, cancellable trait.
//!
//! # Usage
//!
//! ```ignore
//! use arcana_core::backend::{ApiRequest, ApiTransport, CancelToken, HttpBackend};
//!
//! let backend = HttpBackend::from_config(&config)?;
//! let body = backend.fetch(&ApiRequest::status(), &CancelToken::never()).await?;
//! ```

mod http;
mod traits;

pub use http::HttpBackend;
pub use traits::{ApiRequest, ApiTransport, CancelHandle, CancelToken, Method};
