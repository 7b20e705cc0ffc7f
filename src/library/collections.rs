use crate::error::AppResult;
use crate::library::KvStore;
use crate::models::{MovieSummary, PersonSummary, SavedMovie, SavedPerson};

/// Well-known storage keys for the persisted client state
pub mod keys {
    pub const FAVORITES: &str = "favorites";
    pub const WATCHED_MOVIES: &str = "watchedMovies";
    pub const FAVORITE_PERSONS: &str = "favoritePersons";
    pub const AUTOPLAY_TRAILER: &str = "autoplayTrailer";
    pub const INSTALL_PROMPT_DISMISSED: &str = "installPromptDismissed";
}

/// User library: favorites, watched history, favorite persons, settings
///
/// Every mutation is a read-modify-write of the full collection, which is
/// safe under the single-writer assumption of a client application. Within
/// each collection entries are unique by id; the watched list preserves
/// insertion order (display order).
pub struct Library<S> {
    store: S,
}

impl<S: KvStore> Library<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn movies(&self, key: &str) -> AppResult<Vec<SavedMovie>> {
        Ok(self.store.get(key)?.unwrap_or_default())
    }

    fn add_movie(&self, key: &str, movie: MovieSummary) -> AppResult<()> {
        let mut records = self.movies(key)?;
        if records.iter().any(|r| r.movie.id == movie.id) {
            return Ok(());
        }
        tracing::debug!(key, movie_id = movie.id, "Adding movie to collection");
        records.push(SavedMovie::new(movie));
        self.store.set(key, &records)
    }

    fn remove_movie(&self, key: &str, movie_id: u64) -> AppResult<()> {
        let mut records = self.movies(key)?;
        let len_before = records.len();
        records.retain(|r| r.movie.id != movie_id);
        if records.len() == len_before {
            // Absent id: no-op, skip the write
            return Ok(());
        }
        self.store.set(key, &records)
    }

    fn contains_movie(&self, key: &str, movie_id: u64) -> AppResult<bool> {
        Ok(self.movies(key)?.iter().any(|r| r.movie.id == movie_id))
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    pub fn favorites(&self) -> AppResult<Vec<SavedMovie>> {
        self.movies(keys::FAVORITES)
    }

    /// Adds a movie to favorites; re-adding an existing id is a no-op
    pub fn add_favorite(&self, movie: MovieSummary) -> AppResult<()> {
        self.add_movie(keys::FAVORITES, movie)
    }

    pub fn remove_favorite(&self, movie_id: u64) -> AppResult<()> {
        self.remove_movie(keys::FAVORITES, movie_id)
    }

    pub fn is_favorite(&self, movie_id: u64) -> AppResult<bool> {
        self.contains_movie(keys::FAVORITES, movie_id)
    }

    // ------------------------------------------------------------------
    // Watched history
    // ------------------------------------------------------------------

    /// Watched movies in insertion order
    pub fn watched(&self) -> AppResult<Vec<SavedMovie>> {
        self.movies(keys::WATCHED_MOVIES)
    }

    pub fn add_watched(&self, movie: MovieSummary) -> AppResult<()> {
        self.add_movie(keys::WATCHED_MOVIES, movie)
    }

    pub fn remove_watched(&self, movie_id: u64) -> AppResult<()> {
        self.remove_movie(keys::WATCHED_MOVIES, movie_id)
    }

    pub fn is_watched(&self, movie_id: u64) -> AppResult<bool> {
        self.contains_movie(keys::WATCHED_MOVIES, movie_id)
    }

    // ------------------------------------------------------------------
    // Favorite persons
    // ------------------------------------------------------------------

    pub fn favorite_persons(&self) -> AppResult<Vec<SavedPerson>> {
        Ok(self.store.get(keys::FAVORITE_PERSONS)?.unwrap_or_default())
    }

    pub fn add_favorite_person(&self, person: PersonSummary) -> AppResult<()> {
        let mut records = self.favorite_persons()?;
        if records.iter().any(|r| r.person.id == person.id) {
            return Ok(());
        }
        records.push(SavedPerson::new(person));
        self.store.set(keys::FAVORITE_PERSONS, &records)
    }

    pub fn remove_favorite_person(&self, person_id: u64) -> AppResult<()> {
        let mut records = self.favorite_persons()?;
        let len_before = records.len();
        records.retain(|r| r.person.id != person_id);
        if records.len() == len_before {
            return Ok(());
        }
        self.store.set(keys::FAVORITE_PERSONS, &records)
    }

    pub fn is_favorite_person(&self, person_id: u64) -> AppResult<bool> {
        Ok(self
            .favorite_persons()?
            .iter()
            .any(|r| r.person.id == person_id))
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn autoplay_trailer(&self) -> AppResult<bool> {
        Ok(self.store.get(keys::AUTOPLAY_TRAILER)?.unwrap_or(false))
    }

    pub fn set_autoplay_trailer(&self, enabled: bool) -> AppResult<()> {
        self.store.set(keys::AUTOPLAY_TRAILER, &enabled)
    }

    pub fn install_prompt_dismissed(&self) -> AppResult<bool> {
        Ok(self
            .store
            .get(keys::INSTALL_PROMPT_DISMISSED)?
            .unwrap_or(false))
    }

    pub fn set_install_prompt_dismissed(&self) -> AppResult<()> {
        self.store.set(keys::INSTALL_PROMPT_DISMISSED, &true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::MemoryStore;

    fn movie(id: u64, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            poster_path: None,
            backdrop_path: None,
            overview: None,
            vote_average: 7.0,
            release_date: None,
        }
    }

    fn person(id: u64, name: &str) -> PersonSummary {
        PersonSummary {
            id,
            name: name.to_string(),
            profile_path: None,
            known_for_department: None,
        }
    }

    #[test]
    fn test_add_favorite_is_idempotent_by_id() {
        let library = Library::new(MemoryStore::new());

        library.add_favorite(movie(603, "The Matrix")).unwrap();
        library.add_favorite(movie(603, "The Matrix")).unwrap();

        let favorites = library.favorites().unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].movie.id, 603);
    }

    #[test]
    fn test_remove_absent_favorite_is_a_noop() {
        let library = Library::new(MemoryStore::new());

        library.add_favorite(movie(603, "The Matrix")).unwrap();
        library.remove_favorite(999).unwrap();

        assert_eq!(library.favorites().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_favorite() {
        let library = Library::new(MemoryStore::new());

        library.add_favorite(movie(603, "The Matrix")).unwrap();
        library.add_favorite(movie(27205, "Inception")).unwrap();
        library.remove_favorite(603).unwrap();

        let favorites = library.favorites().unwrap();
        assert_eq!(favorites.len(), 1);
        assert!(!library.is_favorite(603).unwrap());
        assert!(library.is_favorite(27205).unwrap());
    }

    #[test]
    fn test_watched_preserves_insertion_order() {
        let library = Library::new(MemoryStore::new());

        library.add_watched(movie(3, "Third")).unwrap();
        library.add_watched(movie(1, "First")).unwrap();
        library.add_watched(movie(2, "Second")).unwrap();

        let ids: Vec<u64> = library
            .watched()
            .unwrap()
            .iter()
            .map(|r| r.movie.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_watched_and_favorites_are_independent() {
        let library = Library::new(MemoryStore::new());

        library.add_watched(movie(603, "The Matrix")).unwrap();

        assert!(library.is_watched(603).unwrap());
        assert!(!library.is_favorite(603).unwrap());
        assert!(library.favorites().unwrap().is_empty());
    }

    #[test]
    fn test_favorite_persons_dedup_and_remove() {
        let library = Library::new(MemoryStore::new());

        library.add_favorite_person(person(6384, "Keanu Reeves")).unwrap();
        library.add_favorite_person(person(6384, "Keanu Reeves")).unwrap();
        assert_eq!(library.favorite_persons().unwrap().len(), 1);
        assert!(library.is_favorite_person(6384).unwrap());

        library.remove_favorite_person(6384).unwrap();
        assert!(library.favorite_persons().unwrap().is_empty());
    }

    #[test]
    fn test_settings_defaults_and_flags() {
        let library = Library::new(MemoryStore::new());

        assert!(!library.autoplay_trailer().unwrap());
        assert!(!library.install_prompt_dismissed().unwrap());

        library.set_autoplay_trailer(true).unwrap();
        library.set_install_prompt_dismissed().unwrap();

        assert!(library.autoplay_trailer().unwrap());
        assert!(library.install_prompt_dismissed().unwrap());
    }
}
