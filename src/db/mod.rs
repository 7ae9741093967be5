//! Persistence layer for album documents.
//!
//! Layout:
//! - `mongo.rs`: MongoDB-backed store (the production connection)
//! - `memory.rs`: in-process store with the same observable behavior

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use serde_json::Value;

use crate::error::AlbumError;
use crate::types::Album;

/// Operations the HTTP layer needs from a document collection.
///
/// Implementations are cloned into every request, so they should wrap any
/// connection state in something cheap to clone.
pub trait AlbumStore: Clone + Send + Sync + 'static {
    /// Every document in the collection, unfiltered and in storage order.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Value>, AlbumError>> + Send;

    /// Insert one album and return the identifier the store assigned to it.
    fn insert_one(&self, album: Album) -> impl Future<Output = Result<String, AlbumError>> + Send;

    /// First album whose own `id` field equals `id`.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Album>, AlbumError>> + Send;
}
