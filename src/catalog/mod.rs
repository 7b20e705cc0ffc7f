//! Catalog API access: request construction, response caching, cross-base
//! fallback, and the popularity rank finder.

pub mod client;
pub mod rank;

pub use client::CatalogClient;
pub use rank::{RankFinder, RankSource, RankedEntry, RankedPage};

/// Whether an endpoint addresses a single movie's detail-type data
///
/// Detail endpoints (`movie/{id}` and its sub-resources such as
/// `movie/{id}/videos`) are routed to the detail API base and are the only
/// requests eligible for the one-shot cross-base fallback. List endpoints
/// like `movie/top_rated` have a non-numeric second segment and stay on the
/// primary base.
pub(crate) fn is_detail_endpoint(endpoint: &str) -> bool {
    let mut segments = endpoint.trim_matches('/').split('/');
    matches!(
        (segments.next(), segments.next()),
        (Some("movie"), Some(id)) if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
    )
}
