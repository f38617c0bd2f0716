//! Shared library for the Memora client tools.
//!
//! This crate provides the data contract, the backend API client, and the
//! client-side heuristics: preview-image resolution and caching, tag
//! grouping, and network diagnostics.

pub mod api;
pub mod cache;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod identity;
pub mod models;
pub mod preview;
pub mod tags;

pub use api::MemoraClient;
pub use cache::{PreviewCache, SystemClock, DEFAULT_PREVIEW_TTL};
pub use config::{Config, Environment};
pub use diagnostics::{DiagnosticResult, ErrorKind, Prober};
pub use error::{Error, Result};
pub use models::{ApiResponse, ContentItem, ContentType, UserStats};
pub use tags::{group_by_tag, TagGroup};
