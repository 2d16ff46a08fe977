use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::extract_id;

/// A film record as served by the remote collection. Fields the service adds
/// beyond the edited ones are kept in `extra` so they survive an edit.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Film {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub opening_crawl: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Film {
    pub fn id(&self) -> Option<Cow<'_, str>> {
        extract_id(&self.url)
    }

    /// Overwrites the user-editable attributes, leaving `url` and `extra` alone.
    pub fn apply_form(&mut self, form: FilmForm) {
        let draft = FilmDraft::from(form);
        self.title = draft.title;
        self.director = draft.director;
        self.release_date = draft.release_date;
        self.opening_crawl = draft.opening_crawl;
    }
}

/// Body of a create request. The service assigns `url`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FilmDraft {
    pub title: String,
    pub director: String,
    pub release_date: String,
    pub opening_crawl: String,
}

/// The four fields posted by the create and edit forms.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FilmForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub opening_crawl: String,
}

impl From<FilmForm> for FilmDraft {
    fn from(form: FilmForm) -> Self {
        Self {
            title: form.title.trim().to_string(),
            director: form.director.trim().to_string(),
            release_date: form.release_date.trim().to_string(),
            opening_crawl: form.opening_crawl,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListResponse {
    pub results: Vec<Film>,
}
