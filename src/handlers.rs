use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::error;

use crate::error::CatalogError;
use crate::models::{NewSet, SetChanges};
use crate::state::AppState;
use crate::templates::{
    AboutTemplate, AddSetTemplate, EditSetTemplate, HomeTemplate, NotFoundTemplate,
    ServerErrorTemplate, SetTemplate, SetsTemplate,
};

#[derive(Debug, Deserialize)]
pub struct SetsQuery {
    pub theme: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddSetForm {
    pub set_num: String,
    pub name: String,
    pub year: i64,
    pub num_parts: i64,
    pub theme_id: i64,
    pub img_url: String,
}

/// The edit form submits more fields, but only the name is forwarded to the
/// store (preserved from the source system).
#[derive(Debug, Deserialize)]
pub struct EditSetForm {
    pub set_num: String,
    pub name: String,
}

pub async fn home() -> impl IntoResponse {
    HomeTemplate { page: "/" }
}

pub async fn about() -> impl IntoResponse {
    AboutTemplate { page: "/about" }
}

pub async fn sets(State(state): State<AppState>, Query(query): Query<SetsQuery>) -> Response {
    let result = match &query.theme {
        Some(theme) => state.store.get_sets_by_theme(theme).await,
        None => state.store.get_all_sets().await,
    };

    match result {
        Ok(sets) => SetsTemplate {
            page: "/lego/sets",
            sets,
        }
        .into_response(),
        Err(err) if err.is_not_found() => {
            not_found_page("Unable to find requested theme sets.")
        }
        Err(err) => server_error_page(&err),
    }
}

pub async fn set_detail(State(state): State<AppState>, Path(num): Path<String>) -> Response {
    match state.store.get_set_by_num(&num).await {
        Ok(set) => SetTemplate { page: "", set }.into_response(),
        Err(err) if err.is_not_found() => not_found_page("Unable to find requested set."),
        Err(err) => server_error_page(&err),
    }
}

pub async fn add_set_form(State(state): State<AppState>) -> Response {
    match state.store.get_all_themes().await {
        Ok(themes) => AddSetTemplate {
            page: "/lego/addSet",
            themes,
        }
        .into_response(),
        Err(err) => server_error_page(&err),
    }
}

pub async fn add_set_submit(
    State(state): State<AppState>,
    axum::extract::Form(form): axum::extract::Form<AddSetForm>,
) -> Response {
    let new_set = NewSet {
        set_num: form.set_num,
        name: form.name,
        year: form.year,
        num_parts: form.num_parts,
        theme_id: Some(form.theme_id),
        img_url: form.img_url,
    };

    match state.store.add_set(&new_set).await {
        Ok(()) => Redirect::to("/lego/sets").into_response(),
        Err(err) => server_error_page(&err),
    }
}

pub async fn edit_set_form(State(state): State<AppState>, Path(num): Path<String>) -> Response {
    let combined = tokio::try_join!(
        state.store.get_set_by_num(&num),
        state.store.get_all_themes()
    );

    match combined {
        Ok((set, themes)) => EditSetTemplate {
            page: "",
            set,
            themes,
        }
        .into_response(),
        Err(err) if err.is_not_found() => not_found_page(err.to_string()),
        Err(err) => server_error_page(&err),
    }
}

pub async fn edit_set_submit(
    State(state): State<AppState>,
    axum::extract::Form(form): axum::extract::Form<EditSetForm>,
) -> Response {
    let changes = SetChanges {
        name: Some(form.name),
        ..Default::default()
    };

    match state.store.edit_set(&form.set_num, &changes).await {
        Ok(()) => Redirect::to("/lego/sets").into_response(),
        Err(err) => server_error_page(&err),
    }
}

pub async fn delete_set(State(state): State<AppState>, Path(num): Path<String>) -> Response {
    match state.store.delete_set(&num).await {
        Ok(()) => Redirect::to("/lego/sets").into_response(),
        Err(err) => server_error_page(&err),
    }
}

pub async fn not_found() -> Response {
    not_found_page("I'm sorry, we're unable to find what you're looking for.")
}

fn not_found_page(msg: impl Into<String>) -> Response {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            page: "",
            msg: msg.into(),
        },
    )
        .into_response()
}

/// Backend failures are logged; not-found pages are not (they are expected
/// traffic, not server faults).
pub(crate) fn server_error_page(err: &CatalogError) -> Response {
    error!(error = %err, "Request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ServerErrorTemplate {
            page: "",
            message: format!("I'm sorry, but we have encountered the following error: {err}"),
        },
    )
        .into_response()
}
