use cinerail::library::{JsonFileStore, KvStore, Library};
use cinerail::models::MovieSummary;

fn movie(id: u64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        poster_path: Some(format!("/poster-{}.jpg", id)),
        backdrop_path: None,
        overview: Some("Overview".to_string()),
        vote_average: 7.8,
        release_date: Some("1999-03-30".to_string()),
    }
}

#[test]
fn test_favorites_survive_a_reload() {
    let dir = tempfile::tempdir().unwrap();

    {
        let library = Library::new(JsonFileStore::new(dir.path()));
        library.add_favorite(movie(603, "The Matrix")).unwrap();
        library.add_favorite(movie(27205, "Inception")).unwrap();
    }

    // Fresh store over the same directory, as after an app restart
    let library = Library::new(JsonFileStore::new(dir.path()));
    let ids: Vec<u64> = library
        .favorites()
        .unwrap()
        .iter()
        .map(|r| r.movie.id)
        .collect();

    assert_eq!(ids, vec![603, 27205]);
    assert!(library.is_favorite(603).unwrap());
}

#[test]
fn test_watched_order_survives_a_reload() {
    let dir = tempfile::tempdir().unwrap();

    {
        let library = Library::new(JsonFileStore::new(dir.path()));
        library.add_watched(movie(3, "Third")).unwrap();
        library.add_watched(movie(1, "First")).unwrap();
        library.add_watched(movie(2, "Second")).unwrap();
    }

    let library = Library::new(JsonFileStore::new(dir.path()));
    let ids: Vec<u64> = library
        .watched()
        .unwrap()
        .iter()
        .map(|r| r.movie.id)
        .collect();

    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn test_collections_use_distinct_blobs() {
    let dir = tempfile::tempdir().unwrap();
    let library = Library::new(JsonFileStore::new(dir.path()));

    library.add_favorite(movie(603, "The Matrix")).unwrap();
    library.add_watched(movie(27205, "Inception")).unwrap();
    library.set_autoplay_trailer(true).unwrap();

    assert!(dir.path().join("favorites.json").exists());
    assert!(dir.path().join("watchedMovies.json").exists());
    assert!(dir.path().join("autoplayTrailer.json").exists());
}

#[test]
fn test_corrupt_collection_blob_surfaces_as_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("favorites.json"), "not json at all").unwrap();

    let library = Library::new(JsonFileStore::new(dir.path()));
    assert!(library.favorites().is_err());
}

#[test]
fn test_settings_round_trip_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());

    store.set("autoplayTrailer", &true).unwrap();
    let value: Option<bool> = store.get("autoplayTrailer").unwrap();
    assert_eq!(value, Some(true));
}
