//! The `bookmarks` resource.
//!
//! Every `/{bookmark_id}` route goes through [`fetch::index::handler`] first,
//! which loads the record into the request extensions or answers 404.

pub mod error;
pub mod response;
pub mod validate;

pub mod list { pub mod index; }
pub mod create { pub mod index; }
pub mod fetch { pub mod index; }
pub mod read { pub mod index; }
pub mod update { pub mod index; }
pub mod delete { pub mod index; }

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, MethodRouter},
    Router,
};

use crate::service::BookmarksService;

#[derive(Clone)]
pub struct AppState {
    pub bookmarks: Arc<dyn BookmarksService>,
}

impl AppState {
    pub fn new(bookmarks: Arc<dyn BookmarksService>) -> Self {
        Self { bookmarks }
    }
}

/// Handlers for the collection path itself (`GET` and `POST`).
pub fn collection() -> MethodRouter<AppState> {
    get(list::index::handler).post(create::index::handler)
}

pub fn router(state: AppState) -> Router {
    let by_id = Router::new()
        .route(
            "/{bookmark_id}",
            get(read::index::handler)
                .delete(delete::index::handler)
                .patch(update::index::handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            fetch::index::handler,
        ));

    Router::new()
        .route("/", collection())
        .merge(by_id)
        .with_state(state)
}
