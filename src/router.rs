use axum::{Router, routing::get};

use crate::db::AlbumStore;
use crate::handlers::{create_album, get_album_by_id, list_albums};

#[derive(Clone)]
pub struct AlbumState<S> {
    pub store: S,
}

impl<S: AlbumStore> AlbumState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

pub fn album_router<S: AlbumStore>(state: AlbumState<S>) -> Router {
    Router::new()
        .route("/albums", get(list_albums::<S>).post(create_album::<S>))
        .route("/albums/{id}", get(get_album_by_id::<S>))
        .with_state(state)
}
