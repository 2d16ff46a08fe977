//! Shared test utilities.

#![allow(dead_code)]

pub mod mock_swapi;

use std::sync::Arc;

use mock_swapi::MockSwapi;
use swfilms::{AppState, catalog::Catalog, client::FilmsClient, id::Endpoint};

pub fn client_for(mock: &MockSwapi) -> FilmsClient {
    FilmsClient::new(reqwest::Client::new(), Endpoint::new(mock.base_url(), "films"), 1000)
}

pub fn catalog_for(mock: &MockSwapi) -> Catalog {
    Catalog::new(client_for(mock))
}

pub fn app_for(mock: &MockSwapi) -> axum::Router {
    swfilms::router(Arc::new(AppState { catalog: catalog_for(mock) }))
}

/// An address nothing listens on.
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/api/")
}
