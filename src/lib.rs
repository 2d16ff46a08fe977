pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod id;
pub mod models;
pub mod routes;
pub mod store;
pub mod templates;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{catalog::Catalog, client::FilmsClient, config::Config, id::Endpoint};

pub struct AppState {
    pub catalog: Catalog,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent("swfilms/0.1");
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let endpoint = Endpoint::new(&config.swapi_base_url, &config.swapi_resource);
        let client = FilmsClient::new(http, endpoint, config.swapi_rps);
        Ok(Self { catalog: Catalog::new(client) })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/reload", post(routes::reload))
        .route("/create", get(routes::create_form).post(routes::create))
        .route("/films/{id}", get(routes::detail))
        .route("/films/{id}/delete", post(routes::delete))
        .route("/edit/{id}", get(routes::edit_form).post(routes::update))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
