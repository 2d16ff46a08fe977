use std::sync::Arc;

use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
};

use crate::{
    AppState,
    error::AppResult,
    models::{FilmDraft, FilmForm},
    templates,
};

pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let complete = state.catalog.ensure_loaded().await?;
    let films = state.catalog.snapshot().await;
    Ok(Html(templates::list_page(&films, complete)))
}

pub async fn reload(State(state): State<Arc<AppState>>) -> AppResult<Redirect> {
    state.catalog.load().await?;
    Ok(Redirect::to("/"))
}

pub async fn create_form() -> Html<String> {
    Html(templates::create_page())
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Form(form): Form<FilmForm>,
) -> AppResult<Redirect> {
    state.catalog.create(FilmDraft::from(form)).await?;
    Ok(Redirect::to("/"))
}

pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let film = state.catalog.fetch(&id).await?;
    Ok(Html(templates::detail_page(&id, &film)))
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let film = state.catalog.fetch(&id).await?;
    Ok(Html(templates::edit_page(&id, &film)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<FilmForm>,
) -> AppResult<Redirect> {
    state.catalog.update(&id, form).await?;
    Ok(Redirect::to(&templates::detail_href(&id)))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    state.catalog.delete(&id).await?;
    Ok(Redirect::to("/"))
}
