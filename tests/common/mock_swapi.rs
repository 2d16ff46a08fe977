//! In-process stand-in for the remote films service.

#![allow(dead_code)]

use std::{collections::VecDeque, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::Mutex};

/// A captured request for assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Inner {
    base: String,
    films: Vec<Value>,
    next_id: u64,
    canned: VecDeque<(StatusCode, String)>,
    delays: VecDeque<Duration>,
    requests: Vec<CapturedRequest>,
}

#[derive(Clone, Default)]
struct MockState(Arc<Mutex<Inner>>);

pub struct MockSwapi {
    pub addr: SocketAddr,
    state: MockState,
}

impl MockSwapi {
    /// Starts a service seeded with the first two films.
    pub async fn start() -> Self {
        let mock = Self::start_empty().await;
        mock.seed(json!({
            "title": "A New Hope",
            "episode_id": 4,
            "director": "George Lucas",
            "release_date": "1977-05-25",
            "opening_crawl": "It is a period of civil war.",
        }))
        .await;
        mock.seed(json!({
            "title": "The Empire Strikes Back",
            "episode_id": 5,
            "director": "Irvin Kershner",
            "release_date": "1980-05-17",
            "opening_crawl": "It is a dark time for the Rebellion.",
        }))
        .await;
        mock
    }

    pub async fn start_empty() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = MockState::default();
        {
            let mut inner = state.0.lock().await;
            inner.base = format!("http://{addr}/api/");
            inner.next_id = 1;
        }

        let app = Router::new().fallback(handle).with_state(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }

    pub fn film_url(&self, id: u64) -> String {
        format!("{}films/{id}/", self.base_url())
    }

    pub async fn seed(&self, film: Value) -> String {
        let mut inner = self.state.0.lock().await;
        inner.insert(film)
    }

    /// Seeds a film addressed by `id`, percent-encoded into its url.
    pub async fn seed_with_id(&self, id: &str, mut film: Value) -> String {
        let mut inner = self.state.0.lock().await;
        let url = format!("{}films/{}/", inner.base, urlencoding::encode(id));
        film["url"] = Value::String(url.clone());
        inner.films.push(film);
        url
    }

    /// The next request is answered only after `ms`. Other requests are served
    /// meanwhile.
    pub async fn delay_next(&self, ms: u64) {
        self.state.0.lock().await.delays.push_back(Duration::from_millis(ms));
    }

    /// The next request gets this response instead of being handled.
    pub async fn respond_next(&self, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).unwrap();
        self.state.0.lock().await.canned.push_back((status, body.to_string()));
    }

    pub async fn films(&self) -> Vec<Value> {
        self.state.0.lock().await.films.clone()
    }

    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.state.0.lock().await.requests.clone()
    }
}

impl Inner {
    fn insert(&mut self, mut film: Value) -> String {
        let url = format!("{}films/{}/", self.base, self.next_id);
        self.next_id += 1;
        film["url"] = Value::String(url.clone());
        self.films.push(film);
        url
    }

    fn position(&self, id: &str) -> Option<usize> {
        let suffix = format!("/films/{id}/");
        self.films.iter().position(|f| f["url"].as_str().is_some_and(|u| u.ends_with(&suffix)))
    }
}

async fn handle(State(state): State<MockState>, method: Method, uri: Uri, body: Bytes) -> Response {
    let body = serde_json::from_slice::<Value>(&body).ok();
    let (canned, delay) = {
        let mut inner = state.0.lock().await;
        inner.requests.push(CapturedRequest {
            method: method.clone(),
            path: uri.path().to_string(),
            body: body.clone(),
        });
        (inner.canned.pop_front(), inner.delays.pop_front())
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    if let Some((status, raw)) = canned {
        return (status, [(header::CONTENT_TYPE, "application/json")], raw).into_response();
    }

    let mut inner = state.0.lock().await;

    let Some(rest) = uri.path().strip_prefix("/api/films/") else {
        return not_found();
    };
    let id = rest.trim_end_matches('/');

    match (method, id.is_empty()) {
        (Method::GET, true) => json_response(
            StatusCode::OK,
            json!({
                "count": inner.films.len(),
                "next": null,
                "previous": null,
                "results": inner.films,
            }),
        ),
        (Method::POST, true) => {
            let Some(Value::Object(fields)) = body else {
                return json_response(StatusCode::BAD_REQUEST, json!({"detail": "JSON object expected"}));
            };
            if fields.get("title").and_then(Value::as_str).is_none_or(str::is_empty) {
                return json_response(
                    StatusCode::BAD_REQUEST,
                    json!({"title": ["This field is required."]}),
                );
            }
            let url = inner.insert(Value::Object(fields));
            let created = inner.films.iter().find(|f| f["url"] == url.as_str()).cloned();
            json_response(StatusCode::CREATED, created.unwrap_or(Value::Null))
        },
        (Method::GET, false) => match inner.position(id) {
            Some(idx) => json_response(StatusCode::OK, inner.films[idx].clone()),
            None => not_found(),
        },
        (Method::PUT, false) => {
            let Some(idx) = inner.position(id) else {
                return not_found();
            };
            let Some(Value::Object(mut fields)) = body else {
                return json_response(StatusCode::BAD_REQUEST, json!({"detail": "JSON object expected"}));
            };
            fields.insert("url".into(), inner.films[idx]["url"].clone());
            inner.films[idx] = Value::Object(fields);
            json_response(StatusCode::OK, inner.films[idx].clone())
        },
        (Method::DELETE, false) => match inner.position(id) {
            Some(idx) => {
                inner.films.remove(idx);
                StatusCode::NO_CONTENT.into_response()
            },
            None => not_found(),
        },
        _ => json_response(StatusCode::METHOD_NOT_ALLOWED, json!({"detail": "Method not allowed."})),
    }
}

fn json_response(status: StatusCode, body: Value) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body.to_string()).into_response()
}

fn not_found() -> Response {
    json_response(StatusCode::NOT_FOUND, json!({"detail": "Not found"}))
}
