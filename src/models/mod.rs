use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Core summary of a movie as shown in browse rails and search results
///
/// Immutable once fetched; re-fetching the same id may overwrite fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub vote_average: f64,
    pub release_date: Option<String>,
}

/// Full detail view of a single movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub vote_average: f64,
    pub vote_count: u64,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub genres: Vec<Genre>,
    pub tagline: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Summary of a person (actor, director, ...) from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonSummary {
    pub id: u64,
    pub name: String,
    pub profile_path: Option<String>,
    pub known_for_department: Option<String>,
}

/// One page of a server-paginated list response
///
/// The conventional list shape from the catalog API. `Page::empty()` is the
/// well-shaped empty sentinel callers receive when every fetch attempt fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }

    /// Convert the page's items while keeping the pagination envelope
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            page: self.page,
            results: self.results.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

// ============================================================================
// Raw catalog API types
// ============================================================================

/// Raw movie entry as it appears in catalog list responses
///
/// The upstream payload is loosely typed: most fields may be absent or null,
/// and trending endpoints mix in TV entries that carry `name` instead of
/// `title`. Everything optional is defaulted here and normalized in the
/// `From` conversion so no loose shape propagates past the boundary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMovie {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl From<RawMovie> for MovieSummary {
    fn from(raw: RawMovie) -> Self {
        MovieSummary {
            id: raw.id,
            title: raw.title.or(raw.name).unwrap_or_default(),
            poster_path: raw.poster_path,
            backdrop_path: raw.backdrop_path,
            overview: raw.overview,
            vote_average: raw.vote_average,
            release_date: raw.release_date.filter(|d| !d.is_empty()),
        }
    }
}

/// Raw detail response from a `movie/{id}` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RawMovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub tagline: Option<String>,
}

impl From<RawMovieDetails> for MovieDetails {
    fn from(raw: RawMovieDetails) -> Self {
        MovieDetails {
            id: raw.id,
            title: raw.title.unwrap_or_default(),
            poster_path: raw.poster_path,
            backdrop_path: raw.backdrop_path,
            overview: raw.overview,
            vote_average: raw.vote_average,
            vote_count: raw.vote_count,
            release_date: raw.release_date.filter(|d| !d.is_empty()),
            runtime: raw.runtime,
            genres: raw.genres,
            tagline: raw.tagline.filter(|t| !t.is_empty()),
        }
    }
}

/// Raw person entry from search/detail responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPerson {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
}

impl From<RawPerson> for PersonSummary {
    fn from(raw: RawPerson) -> Self {
        PersonSummary {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            profile_path: raw.profile_path,
            known_for_department: raw.known_for_department,
        }
    }
}

// ============================================================================
// Library records
// ============================================================================

/// A movie persisted into a named library collection (favorites, watched)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedMovie {
    #[serde(flatten)]
    pub movie: MovieSummary,
    pub saved_at: DateTime<Utc>,
}

impl SavedMovie {
    pub fn new(movie: MovieSummary) -> Self {
        Self {
            movie,
            saved_at: Utc::now(),
        }
    }
}

/// A person persisted into the favorite-persons collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedPerson {
    #[serde(flatten)]
    pub person: PersonSummary,
    pub saved_at: DateTime<Utc>,
}

impl SavedPerson {
    pub fn new(person: PersonSummary) -> Self {
        Self {
            person,
            saved_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_movie_to_summary() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "poster_path": "/matrix.jpg",
            "overview": "A computer hacker learns the truth.",
            "vote_average": 8.2,
            "vote_count": 24000,
            "release_date": "1999-03-30"
        }"#;

        let raw: RawMovie = serde_json::from_str(json).unwrap();
        let summary = MovieSummary::from(raw);

        assert_eq!(summary.id, 603);
        assert_eq!(summary.title, "The Matrix");
        assert_eq!(summary.poster_path, Some("/matrix.jpg".to_string()));
        assert_eq!(summary.vote_average, 8.2);
        assert_eq!(summary.release_date, Some("1999-03-30".to_string()));
    }

    #[test]
    fn test_raw_movie_uses_name_when_title_absent() {
        let json = r#"{ "id": 1399, "name": "Game of Thrones" }"#;

        let raw: RawMovie = serde_json::from_str(json).unwrap();
        let summary = MovieSummary::from(raw);

        assert_eq!(summary.title, "Game of Thrones");
        assert_eq!(summary.vote_average, 0.0);
        assert_eq!(summary.release_date, None);
    }

    #[test]
    fn test_raw_movie_empty_release_date_normalized() {
        let json = r#"{ "id": 7, "title": "Unreleased", "release_date": "" }"#;

        let raw: RawMovie = serde_json::from_str(json).unwrap();
        let summary = MovieSummary::from(raw);

        assert_eq!(summary.release_date, None);
    }

    #[test]
    fn test_raw_details_to_details() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "vote_average": 8.2,
            "vote_count": 24000,
            "runtime": 136,
            "genres": [{"id": 28, "name": "Action"}],
            "tagline": "Free your mind"
        }"#;

        let raw: RawMovieDetails = serde_json::from_str(json).unwrap();
        let details = MovieDetails::from(raw);

        assert_eq!(details.vote_count, 24000);
        assert_eq!(details.runtime, Some(136));
        assert_eq!(details.genres.len(), 1);
        assert_eq!(details.genres[0].name, "Action");
        assert_eq!(details.tagline, Some("Free your mind".to_string()));
    }

    #[test]
    fn test_details_requires_id() {
        // The empty-result sentinel must never parse as a detail payload
        let result = serde_json::from_str::<RawMovieDetails>(r#"{ "results": [] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_page_deserializes_list_shape() {
        let json = r#"{
            "page": 2,
            "results": [{ "id": 1, "title": "One" }, { "id": 2, "title": "Two" }],
            "total_pages": 40,
            "total_results": 800
        }"#;

        let page: Page<RawMovie> = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.total_pages, 40);
    }

    #[test]
    fn test_page_parses_sentinel_as_empty() {
        let page: Page<RawMovie> = serde_json::from_str(r#"{ "results": [] }"#).unwrap();
        assert_eq!(page.page, 1);
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_saved_movie_serde_round_trip() {
        let movie = MovieSummary {
            id: 42,
            title: "Deep Thought".to_string(),
            poster_path: None,
            backdrop_path: None,
            overview: None,
            vote_average: 7.5,
            release_date: Some("2005-04-28".to_string()),
        };

        let saved = SavedMovie::new(movie.clone());
        let json = serde_json::to_string(&saved).unwrap();
        let back: SavedMovie = serde_json::from_str(&json).unwrap();

        assert_eq!(back.movie, movie);
        assert_eq!(back.saved_at, saved.saved_at);
    }
}
