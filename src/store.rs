use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicU64, Ordering},
};

use tracing::{debug, warn};

use crate::{id::extract_id, models::Film};

/// Ordering stamp drawn before a request is sent. Responses carrying a token
/// older than the last one applied for the same film are dropped.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Token(u64);

#[derive(Debug, Default)]
pub struct Sequencer(AtomicU64);

impl Sequencer {
    pub fn next(&self) -> Token {
        Token(self.0.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Loaded,
    Inserted,
    Replaced,
    Removed,
    /// create for a url already present
    Duplicate,
    /// update for a url not present
    Unknown,
    /// delete for an id not present
    Absent,
    Stale,
}

/// In-memory mirror of the remote collection. Entries only change in response
/// to a confirmed remote operation or a full load.
#[derive(Debug, Default)]
pub struct FilmStore {
    films: Vec<Film>,
    loaded: bool,
    applied: HashMap<String, Token>,
    high_water: Token,
}

impl FilmStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn films(&self) -> &[Film] {
        &self.films
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replaces the whole list with the result of a full load. Urls repeated in
    /// `films` keep their first occurrence.
    pub fn replace_all(&mut self, films: Vec<Film>, token: Token) -> Outcome {
        if token < self.high_water {
            debug!(?token, high_water = ?self.high_water, "discarding stale list");
            return Outcome::Stale;
        }

        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(films.len());
        for film in films {
            if seen.insert(film.url.clone()) {
                kept.push(film);
            } else {
                warn!(url = %film.url, "duplicate url in list response");
            }
        }

        for film in &kept {
            self.applied.insert(key(&film.url).into_owned(), token);
        }
        self.films = kept;
        self.loaded = true;
        self.high_water = token;
        Outcome::Loaded
    }

    pub fn apply_create(&mut self, film: Film, token: Token) -> Outcome {
        if self.is_stale(&key(&film.url), token) {
            return Outcome::Stale;
        }
        if self.films.iter().any(|f| f.url == film.url) {
            warn!(url = %film.url, "created film already present");
            return Outcome::Duplicate;
        }
        self.record(key(&film.url).into_owned(), token);
        self.films.push(film);
        Outcome::Inserted
    }

    pub fn apply_update(&mut self, film: Film, token: Token) -> Outcome {
        if self.is_stale(&key(&film.url), token) {
            return Outcome::Stale;
        }
        let Some(slot) = self.films.iter_mut().find(|f| f.url == film.url) else {
            warn!(url = %film.url, "updated film not in collection");
            return Outcome::Unknown;
        };
        let k = key(&film.url).into_owned();
        *slot = film;
        self.record(k, token);
        Outcome::Replaced
    }

    pub fn apply_delete(&mut self, id: &str, token: Token) -> Outcome {
        if self.is_stale(id, token) {
            return Outcome::Stale;
        }
        self.record(id.to_string(), token);

        let before = self.films.len();
        self.films.retain(|f| extract_id(&f.url).as_deref() != Some(id));
        if self.films.len() < before { Outcome::Removed } else { Outcome::Absent }
    }

    fn is_stale(&self, key: &str, token: Token) -> bool {
        let stale = self.applied.get(key).is_some_and(|last| token < *last);
        if stale {
            debug!(key, ?token, "discarding stale response");
        }
        stale
    }

    fn record(&mut self, key: String, token: Token) {
        self.applied.insert(key, token);
        self.high_water = self.high_water.max(token);
    }
}

/// Films whose url yields no identifier are tracked by the raw url.
fn key(url: &str) -> Cow<'_, str> {
    extract_id(url).unwrap_or(Cow::Borrowed(url))
}
