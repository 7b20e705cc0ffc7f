//! Client-side toolkit for browsing a third-party movie catalog.
//!
//! Provides a request layer with an in-memory TTL response cache and
//! cross-base fallback ([`catalog::CatalogClient`]), a popularity rank
//! finder over server-paginated collections ([`catalog::rank`]), and a
//! file-backed library for favorites and watched history ([`library`]).

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod library;
pub mod models;

pub use catalog::{CatalogClient, RankFinder};
pub use config::Config;
pub use error::{AppError, AppResult};
