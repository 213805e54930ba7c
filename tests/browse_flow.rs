//! End-to-end browsing through the public event API: load, filter, reset.

use popcorn::fetch::Resource;
use popcorn::{handle_event, initialize, AppState, Config, Event};

const GENRES: &str = r#"[
    {"id": 28, "name": "Action"},
    {"id": 35, "name": "Comedy"}
]"#;

const MOVIES: &str = r#"[
    {"original_title": "A", "overview": "First", "vote_average": 8.0, "popularity": 10.0,
     "poster_path": "/a.jpg", "genre_ids": [28]},
    {"original_title": "B", "overview": "Second", "vote_average": 4.0, "popularity": 20.0,
     "poster_path": "/b.jpg", "genre_ids": [35]}
]"#;

fn send(state: &mut AppState, event: Event) -> bool {
    handle_event(state, &event).unwrap().0
}

fn loaded_state() -> AppState {
    let mut state = initialize(&Config::default());
    send(&mut state, Event::PermissionsGranted);
    send(
        &mut state,
        Event::ResourceLoaded {
            resource: Resource::Genres,
            status: 200,
            body: GENRES.as_bytes().to_vec(),
        },
    );
    send(
        &mut state,
        Event::ResourceLoaded {
            resource: Resource::Movies,
            status: 200,
            body: MOVIES.as_bytes().to_vec(),
        },
    );
    state
}

fn visible_titles(state: &AppState) -> Vec<&str> {
    state.visible_movies.iter().map(|movie| movie.title()).collect()
}

/// Moves the genre cursor onto `genre`.
fn focus_genre(state: &mut AppState, genre: &str) {
    for _ in 0..state.filters.genres().len() {
        if state.genre_at_cursor() == Some(genre) {
            return;
        }
        send(state, Event::CursorDown);
    }
    panic!("genre {genre} not found");
}

#[test]
fn filter_then_reset() {
    let mut state = loaded_state();
    assert_eq!(visible_titles(&state), vec!["B", "A"]);
    assert_eq!(state.filters.genres(), ["Comedy", "Action"]);

    focus_genre(&mut state, "Action");
    send(&mut state, Event::ToggleGenre);
    assert_eq!(visible_titles(&state), vec!["A"]);

    send(&mut state, Event::EditRating);
    send(&mut state, Event::Backspace);
    send(&mut state, Event::Char('5'));
    send(&mut state, Event::CommitRating);
    assert_eq!(visible_titles(&state), vec!["A"]);

    send(&mut state, Event::EditRating);
    send(&mut state, Event::Backspace);
    send(&mut state, Event::Char('8'));
    send(&mut state, Event::CommitRating);
    assert!(visible_titles(&state).is_empty());

    send(&mut state, Event::ResetFilters);
    assert_eq!(visible_titles(&state), vec!["B", "A"]);
    assert!(!state.filters.is_selected("Action"));
    assert!(state.filters.min_rating().abs() < f64::EPSILON);
}

#[test]
fn conjunctive_genres_exclude_single_genre_movies() {
    let mut state = loaded_state();

    focus_genre(&mut state, "Action");
    send(&mut state, Event::ToggleGenre);
    focus_genre(&mut state, "Comedy");
    send(&mut state, Event::ToggleGenre);

    assert!(visible_titles(&state).is_empty());

    send(&mut state, Event::ToggleGenre);
    assert_eq!(visible_titles(&state), vec!["A"]);
}

#[test]
fn rating_threshold_is_strict() {
    let mut state = loaded_state();

    for _ in 0..8 {
        send(&mut state, Event::RatingUp);
    }

    assert!((state.filters.min_rating() - 4.0).abs() < f64::EPSILON);
    assert_eq!(visible_titles(&state), vec!["A"]);
}

#[test]
fn rendered_cards_follow_the_visible_list() {
    let state = loaded_state();

    let vm = state.compute_viewmodel(40, 80);

    assert_eq!(vm.result_count, "Showing 2 movies");
    let titles: Vec<&str> = vm.cards.iter().map(|card| card.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A"]);
    assert_eq!(vm.cards[1].rating, "Rating: 8/10");
    assert_eq!(vm.cards[1].genres, "Genres: Action");
    assert_eq!(vm.cards[1].poster_url, "https://image.tmdb.org/t/p/w500/a.jpg");
}

#[test]
fn unknown_genre_ids_fail_when_configured() {
    let config = Config {
        unknown_genre: popcorn::UnknownGenrePolicy::Fail,
        ..Config::default()
    };
    let mut state = initialize(&config);

    send(
        &mut state,
        Event::ResourceLoaded {
            resource: Resource::Genres,
            status: 200,
            body: br#"[{"id": 28, "name": "Action"}]"#.to_vec(),
        },
    );
    send(
        &mut state,
        Event::ResourceLoaded {
            resource: Resource::Movies,
            status: 200,
            body: MOVIES.as_bytes().to_vec(),
        },
    );

    let vm = state.compute_viewmodel(24, 80);
    let empty = vm.empty_state.unwrap();
    assert!(empty.is_error);
    assert_eq!(empty.subtitle, "Movie \"B\" references unknown genre id 35");
}
