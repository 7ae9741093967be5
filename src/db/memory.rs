use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::db::AlbumStore;
use crate::error::AlbumError;
use crate::types::Album;

/// Album store held in process memory. Documents keep insertion order and
/// are rendered with an `_id` the way the MongoDB store renders them.
#[derive(Clone, Default)]
pub struct MemoryStore {
    docs: Arc<RwLock<Vec<(ObjectId, Album)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    /// Whether no document has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

impl AlbumStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Value>, AlbumError> {
        let docs = self.docs.read().await;
        docs.iter()
            .map(|(oid, album)| -> Result<Value, AlbumError> {
                let mut value = serde_json::to_value(album)
                    .map_err(|e| AlbumError::Backend(Box::new(e)))?;
                if let Value::Object(map) = &mut value {
                    map.insert("_id".to_string(), Value::String(oid.to_hex()));
                }
                Ok(value)
            })
            .collect()
    }

    async fn insert_one(&self, album: Album) -> Result<String, AlbumError> {
        let oid = ObjectId::new();
        self.docs.write().await.push((oid, album));
        Ok(oid.to_hex())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Album>, AlbumError> {
        let docs = self.docs.read().await;
        Ok(docs
            .iter()
            .find(|(_, album)| album.id == id)
            .map(|(_, album)| album.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album(id: &str) -> Album {
        Album {
            id: id.to_string(),
            title: "Jeru".to_string(),
            artist: "Gerry Mulligan".to_string(),
            price: 17.99,
        }
    }

    #[tokio::test]
    async fn duplicate_ids_are_kept_and_first_wins() {
        let store = MemoryStore::new();
        let first = store.insert_one(album("2")).await.unwrap();
        let mut second = album("2");
        second.title = "Other".to_string();
        let second_oid = store.insert_one(second).await.unwrap();

        assert_ne!(first, second_oid);
        assert_eq!(store.len().await, 2);
        let found = store.find_by_id("2").await.unwrap().unwrap();
        assert_eq!(found.title, "Jeru");
    }

    #[tokio::test]
    async fn listing_includes_surrogate_id() {
        let store = MemoryStore::new();
        let oid = store.insert_one(album("3")).await.unwrap();
        let docs = store.find_all().await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["_id"], oid);
        assert_eq!(docs[0]["id"], "3");
    }

    #[tokio::test]
    async fn missing_id_is_none() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);
        assert!(store.find_by_id("nope").await.unwrap().is_none());
    }
}
