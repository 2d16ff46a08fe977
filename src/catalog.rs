use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::{
    client::FilmsClient,
    error::ClientError,
    models::{Film, FilmDraft, FilmForm},
    store::{FilmStore, Outcome, Sequencer},
};

const LOAD_ATTEMPTS: usize = 3;

/// Runs each action as request-then-apply: a token is drawn, the remote call
/// is awaited, and only a successful result reaches the store.
pub struct Catalog {
    client: FilmsClient,
    store: RwLock<FilmStore>,
    seq: Sequencer,
}

impl Catalog {
    pub fn new(client: FilmsClient) -> Self {
        Self { client, store: RwLock::new(FilmStore::new()), seq: Sequencer::default() }
    }

    pub fn client(&self) -> &FilmsClient {
        &self.client
    }

    pub async fn snapshot(&self) -> Vec<Film> {
        self.store.read().await.films().to_vec()
    }

    pub async fn is_loaded(&self) -> bool {
        self.store.read().await.is_loaded()
    }

    pub async fn load(&self) -> Result<Outcome, ClientError> {
        let token = self.seq.next();
        let films = self.client.list().await?;
        let count = films.len();
        let outcome = self.store.write().await.replace_all(films, token);
        if outcome == Outcome::Stale {
            warn!(count, "list overtaken by a newer change, not applied");
        } else {
            info!(count, ?outcome, "loaded films");
        }
        Ok(outcome)
    }

    /// Loads the collection unless a full list is already applied. A list that
    /// a concurrent change made stale is requested again. Returns whether the
    /// store holds a complete list afterwards.
    pub async fn ensure_loaded(&self) -> Result<bool, ClientError> {
        for _ in 0..LOAD_ATTEMPTS {
            if self.is_loaded().await {
                return Ok(true);
            }
            self.load().await?;
        }
        Ok(self.is_loaded().await)
    }

    /// Remote read for a single film. The store is not touched.
    pub async fn fetch(&self, id: &str) -> Result<Film, ClientError> {
        self.client.get(id).await
    }

    pub async fn create(&self, draft: FilmDraft) -> Result<Film, ClientError> {
        let token = self.seq.next();
        let film = self.client.create(&draft).await?;
        let outcome = self.store.write().await.apply_create(film.clone(), token);
        debug!(url = %film.url, ?outcome, "applied create");
        Ok(film)
    }

    /// Overlays the edited fields on the current remote record and sends the
    /// whole record back, so fields the form does not show are preserved.
    pub async fn update(&self, id: &str, form: FilmForm) -> Result<Film, ClientError> {
        let token = self.seq.next();
        let mut film = self.client.get(id).await?;
        film.apply_form(form);
        let film = self.client.update(id, &film).await?;
        let outcome = self.store.write().await.apply_update(film.clone(), token);
        debug!(id, ?outcome, "applied update");
        Ok(film)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let token = self.seq.next();
        self.client.delete(id).await?;
        let outcome = self.store.write().await.apply_delete(id, token);
        debug!(id, ?outcome, "applied delete");
        Ok(())
    }
}
