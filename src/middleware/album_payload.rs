use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use tracing::warn;

use crate::error::AlbumError;
use crate::types::Album;

/// JSON body of `POST /albums`.
///
/// The body is decoded as JSON whatever its `Content-Type`. A body that
/// cannot be read or does not decode into an `Album` is rejected with
/// `AlbumError::InvalidBody`, so the handler never runs.
pub struct AlbumPayload(pub Album);

impl<S> FromRequest<S> for AlbumPayload
where
    S: Send + Sync,
{
    type Rejection = AlbumError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            warn!(status = %rejection.status(), "could not read album payload");
            AlbumError::InvalidBody(rejection.body_text())
        })?;

        serde_json::from_slice::<Album>(&body)
            .map(AlbumPayload)
            .map_err(|e| {
                warn!(error = %e, "rejected album payload");
                AlbumError::InvalidBody(e.to_string())
            })
    }
}
