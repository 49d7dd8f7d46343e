use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tracing::error;

use crate::handlers::{
    about, add_set_form, add_set_submit, delete_set, edit_set_form, edit_set_submit, home,
    not_found, server_error_page, set_detail, sets,
};
use crate::state::AppState;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/lego/sets", get(sets))
        .route("/lego/sets/:num", get(set_detail))
        .route("/lego/addSet", get(add_set_form).post(add_set_submit))
        .route("/lego/editSet/:num", get(edit_set_form))
        .route("/lego/editSet", post(edit_set_submit))
        .route("/lego/deleteSet/:num", get(delete_set))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            ensure_store_ready,
        ))
        // Static assets skip store initialization, as in the source system.
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}

/// Every request triggers store initialization before it is handled. The
/// store makes this single-flight, so only the first request pays for it.
async fn ensure_store_ready(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Err(err) = state.store.initialize().await {
        error!(error = %err, "Error initializing data");
        return server_error_page(&err);
    }
    next.run(request).await
}
