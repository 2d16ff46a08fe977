use std::num::NonZeroU32;

use axum::http::StatusCode;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::ClientError,
    id::Endpoint,
    models::{Film, FilmDraft, ListResponse},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Op {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Op {
    fn as_str(self) -> &'static str {
        match self {
            Op::List => "list",
            Op::Get => "get",
            Op::Create => "create",
            Op::Update => "update",
            Op::Delete => "delete",
        }
    }

    fn sends_body(self) -> bool {
        matches!(self, Op::Create | Op::Update)
    }
}

/// HTTP client for one collection of the remote films service. Each call is a
/// single request; nothing is retried and nothing is cached.
pub struct FilmsClient {
    client: reqwest::Client,
    endpoint: Endpoint,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl FilmsClient {
    pub fn new(client: reqwest::Client, endpoint: Endpoint, rps: u32) -> Self {
        let rps = NonZeroU32::new(rps.max(1)).unwrap_or(NonZeroU32::MIN);
        let limiter = RateLimiter::direct(Quota::per_second(rps));
        Self { client, endpoint, limiter }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn list(&self) -> Result<Vec<Film>, ClientError> {
        let req = self.client.get(self.endpoint.collection_url());
        let resp: ListResponse = decode(self.send(Op::List, None, req).await?).await?;
        debug!(count = resp.results.len(), "listed films");
        Ok(resp.results)
    }

    pub async fn get(&self, id: &str) -> Result<Film, ClientError> {
        let req = self.client.get(self.endpoint.resource_url(id));
        decode(self.send(Op::Get, Some(id), req).await?).await
    }

    pub async fn create(&self, draft: &FilmDraft) -> Result<Film, ClientError> {
        let req = self.client.post(self.endpoint.collection_url()).json(draft);
        decode(self.send(Op::Create, None, req).await?).await
    }

    /// Full replacement of the record at `id`.
    pub async fn update(&self, id: &str, film: &Film) -> Result<Film, ClientError> {
        let req = self.client.put(self.endpoint.resource_url(id)).json(film);
        decode(self.send(Op::Update, Some(id), req).await?).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let req = self.client.delete(self.endpoint.resource_url(id));
        self.send(Op::Delete, Some(id), req).await?;
        Ok(())
    }

    async fn send(
        &self,
        op: Op,
        id: Option<&str>,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        self.limiter.until_ready().await;

        debug!(op = op.as_str(), id = id.unwrap_or("-"), "sending films request");
        let resp = req.send().await.map_err(|err| {
            warn!(op = op.as_str(), error = %err, "films request did not complete");
            ClientError::Network(err)
        })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.map_err(ClientError::Network)?;
        let err = classify(op, id, status, body);
        warn!(op = op.as_str(), %status, error = %err, "films request failed");
        Err(err)
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    resp.json().await.map_err(|err| {
        if err.is_decode() { ClientError::Decode(err) } else { ClientError::Network(err) }
    })
}

fn classify(op: Op, id: Option<&str>, status: StatusCode, body: String) -> ClientError {
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return ClientError::NotFound { id: id.to_string() };
        }
    }

    if status.is_client_error() && op.sends_body() && !body.trim().is_empty() {
        let body = serde_json::from_str(&body).unwrap_or(Value::String(body));
        return ClientError::Validation { status, body };
    }

    ClientError::Server { status, body }
}
