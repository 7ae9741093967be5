use serde::{Deserialize, Serialize};

/// A record album. Stored documents may carry extra fields (such as the
/// database `_id`); those are dropped on decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub price: f64,
}

/// Body of a successful `POST /albums`: the database-assigned `_id`,
/// not the client's `id`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CreatedAlbum {
    pub id: String,
}
