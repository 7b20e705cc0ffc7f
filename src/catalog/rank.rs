//! Popularity rank lookup over a server-paginated collection.
//!
//! The catalog exposes its vote-count-descending, threshold-filtered
//! collection only through fixed-size pages; there is no "rank of X"
//! endpoint. The rank is recovered by checking page 1 directly and then
//! binary-searching the remaining page range, comparing the target's vote
//! count against each probed page's first and last entries.

use async_trait::async_trait;

use crate::{
    catalog::client::CatalogClient,
    error::{AppError, AppResult},
};

/// Entries per collection page, fixed by the upstream API
pub const PAGE_SIZE: u32 = 20;

/// Ranks beyond this depth are not resolved
pub const MAX_RANK_DEPTH: u32 = 5000;

/// Collection filter: entries below this vote count are excluded upstream
pub const MIN_VOTE_COUNT: u64 = 100;

/// One entry of a ranked collection page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub id: u64,
    pub vote_count: u64,
}

/// One page of the ranked collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedPage {
    pub entries: Vec<RankedEntry>,
    pub total_pages: u32,
}

/// Source of ranked collection pages and target vote counts
///
/// Seam between the rank search and the catalog client, so the search logic
/// can be exercised against synthetic collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RankSource: Send + Sync {
    /// The target movie's own vote count, `None` when unavailable
    async fn target_vote_count(&self, movie_id: u64) -> AppResult<Option<u64>>;

    /// Fetches one page of the ranked collection (1-based page index)
    async fn ranked_page(&self, page: u32) -> AppResult<RankedPage>;
}

#[async_trait]
impl RankSource for CatalogClient {
    async fn target_vote_count(&self, movie_id: u64) -> AppResult<Option<u64>> {
        match self.movie_details(movie_id).await {
            Ok(details) => Ok(Some(details.vote_count)),
            Err(AppError::ExternalApi(reason)) => {
                tracing::debug!(movie_id, %reason, "Vote count unavailable");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn ranked_page(&self, page: u32) -> AppResult<RankedPage> {
        let result = self.discover_page(page, MIN_VOTE_COUNT).await?;
        Ok(RankedPage {
            entries: result
                .results
                .into_iter()
                .map(|movie| RankedEntry {
                    id: movie.id,
                    vote_count: movie.vote_count,
                })
                .collect(),
            total_pages: result.total_pages,
        })
    }
}

/// Resolves a movie's 1-based ordinal rank within the ranked collection
pub struct RankFinder<S> {
    source: S,
}

impl<S: RankSource> RankFinder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Finds the movie's rank, or `None` when it cannot be resolved
    ///
    /// "Unranked" is a defined terminal state, not an error: it covers a
    /// missing vote count, a movie absent from the collection, ranks beyond
    /// [`MAX_RANK_DEPTH`], and any fetch failure along the way.
    pub async fn find_rank(&self, movie_id: u64) -> Option<u32> {
        match self.search(movie_id).await {
            Ok(rank) => rank,
            Err(e) => {
                tracing::debug!(movie_id, error = %e, "Rank lookup failed");
                None
            }
        }
    }

    async fn search(&self, movie_id: u64) -> AppResult<Option<u32>> {
        let Some(target_votes) = self.source.target_vote_count(movie_id).await? else {
            return Ok(None);
        };

        // Fast path: the common case sits on page 1, where sorting ties and
        // pagination drift are unlikely.
        let first = self.source.ranked_page(1).await?;
        if let Some(position) = position_of(&first, movie_id) {
            return Ok(Some(rank_at(1, position)));
        }

        let max_page = (MAX_RANK_DEPTH / PAGE_SIZE).min(first.total_pages);
        let mut low = 2u32;
        let mut high = max_page;

        while low <= high {
            let mid = low + (high - low) / 2;
            let page = self.source.ranked_page(mid).await?;

            if let Some(position) = position_of(&page, movie_id) {
                return Ok(Some(rank_at(mid, position)));
            }

            let Some((first_votes, last_votes)) = vote_bounds(&page) else {
                // Empty page: the collection ends before this page
                high = mid - 1;
                continue;
            };

            if target_votes > first_votes {
                high = mid - 1;
            } else if target_votes < last_votes {
                low = mid + 1;
            } else {
                // The vote count falls within this page's range but the id is
                // absent: equal counts are ordered by an unexposed secondary
                // key, so the entry may sit on a neighboring page. Probe both
                // neighbors, then advance past mid. Known approximation: a
                // cluster of 20+ tied entries can defeat the probe.
                for neighbor in [mid - 1, mid + 1] {
                    if neighbor < 1 || neighbor > max_page {
                        continue;
                    }
                    let probe = self.source.ranked_page(neighbor).await?;
                    if let Some(position) = position_of(&probe, movie_id) {
                        return Ok(Some(rank_at(neighbor, position)));
                    }
                }
                low = mid + 1;
            }
        }

        Ok(None)
    }
}

fn position_of(page: &RankedPage, movie_id: u64) -> Option<u32> {
    page.entries
        .iter()
        .position(|entry| entry.id == movie_id)
        .map(|p| p as u32)
}

fn rank_at(page: u32, position: u32) -> u32 {
    (page - 1) * PAGE_SIZE + position + 1
}

fn vote_bounds(page: &RankedPage) -> Option<(u64, u64)> {
    let first = page.entries.first()?;
    let last = page.entries.last()?;
    Some((first.vote_count, last.vote_count))
}
