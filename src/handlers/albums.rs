use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::db::AlbumStore;
use crate::error::AlbumError;
use crate::middleware::AlbumPayload;
use crate::router::AlbumState;
use crate::types::{Album, CreatedAlbum};

/// `GET /albums`: every stored document, as the store returned it.
pub async fn list_albums<S: AlbumStore>(
    State(state): State<AlbumState<S>>,
) -> Result<Json<Vec<Value>>, AlbumError> {
    let docs = state.store.find_all().await?;
    debug!(count = docs.len(), "listing albums");
    Ok(Json(docs))
}

/// `POST /albums`: insert the decoded album and answer with the surrogate id.
pub async fn create_album<S: AlbumStore>(
    State(state): State<AlbumState<S>>,
    AlbumPayload(album): AlbumPayload,
) -> Result<(StatusCode, Json<CreatedAlbum>), AlbumError> {
    debug!(album_id = %album.id, title = %album.title, "new album");
    let id = state.store.insert_one(album).await?;
    info!(inserted_id = %id, "inserted a new album");
    Ok((StatusCode::CREATED, Json(CreatedAlbum { id })))
}

/// `GET /albums/{id}`: lookup by the album's own `id` field.
///
/// A store failure is reported to the client exactly like a miss.
pub async fn get_album_by_id<S: AlbumStore>(
    State(state): State<AlbumState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Album>, AlbumError> {
    match state.store.find_by_id(&id).await {
        Ok(Some(album)) => Ok(Json(album)),
        Ok(None) => {
            debug!(album_id = %id, "album not found");
            Err(AlbumError::NotFound)
        }
        Err(e) => {
            warn!(album_id = %id, error = %e, "album lookup failed");
            Err(AlbumError::NotFound)
        }
    }
}
