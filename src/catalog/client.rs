use std::sync::Arc;
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde_json::{json, Value};
use tokio::task::JoinSet;

use crate::{
    cache::{CacheKey, MemoryCache},
    catalog::is_detail_endpoint,
    config::Config,
    error::{AppError, AppResult},
    models::{MovieDetails, MovieSummary, Page, PersonSummary, RawMovie, RawMovieDetails, RawPerson},
};

/// Client for the movie catalog API
///
/// Owns the HTTP client and the in-memory response cache. Cloning is cheap
/// and clones share the same cache, so one client constructed at startup
/// acts as the process-wide request layer.
#[derive(Clone)]
pub struct CatalogClient {
    http_client: HttpClient,
    config: Config,
    cache: Arc<MemoryCache>,
}

impl CatalogClient {
    pub fn new(config: Config) -> Self {
        let cache = MemoryCache::new(Duration::from_secs(config.cache_ttl_secs));
        Self {
            http_client: HttpClient::new(),
            config,
            cache: Arc::new(cache),
        }
    }

    /// Explicitly drops every cached response
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn base_url(&self, detail_base: bool) -> &str {
        if detail_base {
            &self.config.detail_api_url
        } else {
            &self.config.primary_api_url
        }
    }

    /// One attempt against one base
    ///
    /// Fails on a non-success status, an unparseable body, or a body whose
    /// `results` list is present but empty (a list shape was expected and
    /// the upstream returned nothing useful).
    async fn request(&self, base: &str, endpoint: &str, params: &[(&str, &str)]) -> AppResult<Value> {
        let url = format!(
            "{}/{}",
            base.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.config.catalog_api_key.as_str()),
                ("language", self.config.language.as_str()),
            ])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Catalog API returned status {}: {}",
                status, body
            )));
        }

        let payload: Value = response.json().await?;

        if let Some(results) = payload.get("results").and_then(Value::as_array) {
            if results.is_empty() {
                return Err(AppError::ExternalApi(format!(
                    "Empty result list from {}",
                    endpoint
                )));
            }
        }

        Ok(payload)
    }

    /// Fetches a catalog resource, consulting the cache first
    ///
    /// Never fails: any unrecoverable error degrades to the empty-result
    /// sentinel `{"results": []}` so callers always receive a well-shaped
    /// JSON value. Detail endpoints are routed to the detail base (or forced
    /// there via `force_detail_base`) and get exactly one retry against the
    /// alternate base on failure; list endpoints get no retry. Successful
    /// payloads are cached before being returned.
    pub async fn fetch_catalog(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        force_detail_base: bool,
    ) -> Value {
        let key = CacheKey::new(endpoint, params);
        if let Some(payload) = self.cache.get(&key) {
            tracing::debug!(key = %key, "Cache hit");
            return payload;
        }

        let detail = is_detail_endpoint(endpoint);
        let use_detail_base = detail || force_detail_base;

        let payload = match self.request(self.base_url(use_detail_base), endpoint, params).await {
            Ok(payload) => Some(payload),
            Err(e) if detail => {
                tracing::warn!(
                    endpoint = %endpoint,
                    error = %e,
                    "Detail fetch failed, retrying against alternate base"
                );
                match self
                    .request(self.base_url(!use_detail_base), endpoint, params)
                    .await
                {
                    Ok(payload) => Some(payload),
                    Err(e) => {
                        tracing::warn!(endpoint = %endpoint, error = %e, "Fallback fetch failed");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(endpoint = %endpoint, error = %e, "Catalog fetch failed");
                None
            }
        };

        match payload {
            Some(payload) => {
                self.cache.insert(key, payload.clone());
                payload
            }
            None => json!({ "results": [] }),
        }
    }

    /// Fetches a paginated movie list endpoint into typed summaries
    ///
    /// The empty sentinel parses into an empty page, so a failed upstream
    /// fetch surfaces as an empty rail rather than an error.
    pub async fn movie_list(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> AppResult<Page<MovieSummary>> {
        let payload = self.fetch_catalog(endpoint, params, false).await;
        let page: Page<RawMovie> = serde_json::from_value(payload)?;
        Ok(page.map(MovieSummary::from))
    }

    /// Searches movies by title
    pub async fn search_movies(&self, query: &str, page: u32) -> AppResult<Page<MovieSummary>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let page_param = page.to_string();
        let result = self
            .movie_list(
                "search/movie",
                &[
                    ("query", query),
                    ("page", page_param.as_str()),
                    ("include_adult", "false"),
                ],
            )
            .await?;

        tracing::info!(query = %query, results = result.results.len(), "Movie search completed");
        Ok(result)
    }

    /// Searches people by name
    pub async fn search_persons(&self, query: &str, page: u32) -> AppResult<Page<PersonSummary>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let page_param = page.to_string();
        let payload = self
            .fetch_catalog(
                "search/person",
                &[("query", query), ("page", page_param.as_str())],
                false,
            )
            .await;
        let page: Page<RawPerson> = serde_json::from_value(payload)?;
        Ok(page.map(PersonSummary::from))
    }

    /// Fetches the full detail view of one movie
    ///
    /// A sentinel response (both bases failed) carries no `id` and is
    /// reported as an external API error.
    pub async fn movie_details(&self, movie_id: u64) -> AppResult<MovieDetails> {
        let endpoint = format!("movie/{}", movie_id);
        let payload = self.fetch_catalog(&endpoint, &[], false).await;

        let raw: RawMovieDetails = serde_json::from_value(payload).map_err(|e| {
            AppError::ExternalApi(format!("Malformed detail payload for movie {}: {}", movie_id, e))
        })?;
        Ok(MovieDetails::from(raw))
    }

    /// Fetches the detail view of one person
    pub async fn person_details(&self, person_id: u64) -> AppResult<PersonSummary> {
        let endpoint = format!("person/{}", person_id);
        let payload = self.fetch_catalog(&endpoint, &[], false).await;

        let raw: RawPerson = serde_json::from_value(payload).map_err(|e| {
            AppError::ExternalApi(format!(
                "Malformed detail payload for person {}: {}",
                person_id, e
            ))
        })?;
        Ok(PersonSummary::from(raw))
    }

    /// One page of the vote-count-descending, threshold-filtered collection
    ///
    /// This is the collection the rank finder searches over.
    pub async fn discover_page(&self, page: u32, min_vote_count: u64) -> AppResult<Page<RawMovie>> {
        let page_param = page.to_string();
        let votes_param = min_vote_count.to_string();
        let payload = self
            .fetch_catalog(
                "discover/movie",
                &[
                    ("sort_by", "vote_count.desc"),
                    ("vote_count.gte", votes_param.as_str()),
                    ("page", page_param.as_str()),
                ],
                false,
            )
            .await;
        Ok(serde_json::from_value(payload)?)
    }

    /// Fetches details for several movies concurrently (fan-out/fan-in)
    ///
    /// One failing fetch does not cancel the others; results come back in
    /// input order with per-id outcomes. Dropping the returned future aborts
    /// any in-flight tasks, so a caller that navigates away does not leave
    /// stray requests racing stale state updates.
    pub async fn movie_details_batch(&self, movie_ids: &[u64]) -> Vec<AppResult<MovieDetails>> {
        let mut tasks = JoinSet::new();
        for (index, movie_id) in movie_ids.iter().copied().enumerate() {
            let client = self.clone();
            tasks.spawn(async move { (index, client.movie_details(movie_id).await) });
        }

        let mut results: Vec<AppResult<MovieDetails>> = (0..movie_ids.len())
            .map(|_| Err(AppError::Internal("Batch task did not complete".to_string())))
            .collect();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = result,
                Err(e) => {
                    tracing::error!(error = %e, "Task join error");
                }
            }
        }

        let error_count = results.iter().filter(|r| r.is_err()).count();
        if error_count > 0 {
            tracing::warn!(
                success_count = results.len() - error_count,
                error_count,
                "Partial batch fetch failure"
            );
        }

        results
    }
}
