//! Arcana Core - Request/Render Pipeline for the Tarot Client
//!
//! This crate holds the client side of the tarot reader: it talks to the
//! tarot HTTP API, keeps only the newest request alive, maps responses onto
//! view models and renders them to HTML for whatever surface displays them.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Surfaces                              │
//! │        ┌──────────────┐        ┌───────────────────┐          │
//! │        │  CLI stdout  │        │  browser / other  │          │
//! │        └──────┬───────┘        └─────────┬─────────┘          │
//! │               └────────────┬─────────────┘                    │
//! │                  Action (up)  markup (down)                   │
//! └────────────────────────────┼──────────────────────────────────┘
//!                              │
//! ┌────────────────────────────┼──────────────────────────────────┐
//! │                      ARCANA CORE                               │
//! │  ┌─────────────────────────┴───────────────────────────────┐  │
//! │  │                      Controller                          │  │
//! │  │  ┌─────────────┐  ┌──────────┐  ┌──────────┐            │  │
//! │  │  │ Coordinator │─▶│  Mapper  │─▶│ Renderer │            │  │
//! │  │  └──────┬──────┘  └──────────┘  └──────────┘            │  │
//! │  └─────────┼──────────────────────────────────────────────┘  │
//! │            │ ApiTransport + CancelToken                       │
//! │     ┌──────┴──────┐                                           │
//! │     │ HttpBackend │ ── reqwest ──▶ /api/...                   │
//! │     └─────────────┘                                           │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Controller`]: runs an [`Action`] end to end and writes into a [`Surface`]
//! - [`RequestCoordinator`]: last-request-wins call slot plus loading indicator
//! - [`ViewModelMapper`]: raw JSON to [`ViewModel`]
//! - [`HttpBackend`]: the [`ApiTransport`] over HTTP
//! - [`ClientConfig`]: base URL, timeout and preview budget
//!
//! # Quick Start
//!
//! ```ignore
//! use arcana_core::{load_config, Action, Controller, HttpBackend, SpreadKind, ViewModelMapper};
//!
//! let config = load_config()?;
//! let backend = HttpBackend::from_config(&config)?;
//! let controller = Controller::new(backend, my_surface, ViewModelMapper::new(config.preview_chars));
//!
//! controller.dispatch(&Action::LoadSpread(SpreadKind::Three)).await;
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod config;
pub mod content;
pub mod controller;
pub mod coordinator;
pub mod error;
pub mod mapper;
pub mod model;
pub mod render;

// Re-exports for convenience
pub use backend::{ApiRequest, ApiTransport, CancelHandle, CancelToken, HttpBackend, Method};
pub use config::{
    default_config_path, load_config, load_config_from_path, ClientConfig, ConfigError,
    ConfigOverrides, ConfigSource,
};
pub use content::{Arcana, Narrative, Orientation, SpreadSlot, Suit};
pub use controller::{Action, ActionOutcome, Controller, InputField, Region, Surface};
pub use coordinator::{FailureReason, LoadingGuard, Outcome, RequestCoordinator};
pub use error::{InputError, TransportError};
pub use mapper::{
    CardDetailView, CardView, RawShape, ReadingCard, ReadingView, SearchRow, SearchView, Summary,
    ViewContext, ViewModel, ViewModelMapper,
};
pub use model::{RawCard, SpreadKind};
