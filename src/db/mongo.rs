use futures::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{Bson, Document, doc},
    options::{ClientOptions, ServerApi, ServerApiVersion},
};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::db::AlbumStore;
use crate::error::AlbumError;
use crate::types::Album;

#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: String,
    collection: String,
}

impl MongoStore {
    /// Build a client for `cfg.mongodb_uri` pinned to Stable API v1 and ping
    /// the deployment before handing it out.
    pub async fn connect(cfg: &Config) -> Result<Self, AlbumError> {
        let mut options = ClientOptions::parse(&cfg.mongodb_uri).await?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        let client = Client::with_options(options)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        info!(
            database = %cfg.mongo_default_database,
            collection = %cfg.mongo_collection,
            "connected to MongoDB"
        );

        Ok(Self::new(
            client,
            cfg.mongo_default_database.clone(),
            cfg.mongo_collection.clone(),
        ))
    }

    pub fn new(client: Client, database: String, collection: String) -> Self {
        Self {
            client,
            database,
            collection,
        }
    }

    fn collection<T: Send + Sync>(&self) -> Collection<T> {
        self.client
            .database(&self.database)
            .collection::<T>(&self.collection)
    }
}

impl AlbumStore for MongoStore {
    async fn find_all(&self) -> Result<Vec<Value>, AlbumError> {
        let cursor = self.collection::<Document>().find(doc! {}).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        debug!(count = docs.len(), "fetched album documents");
        Ok(docs
            .into_iter()
            .map(|d| bson_to_json(Bson::Document(d)))
            .collect())
    }

    async fn insert_one(&self, album: Album) -> Result<String, AlbumError> {
        let result = self.collection::<Album>().insert_one(album).await?;
        Ok(surrogate_id(result.inserted_id))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Album>, AlbumError> {
        let album = self
            .collection::<Album>()
            .find_one(doc! { "id": id })
            .await?;
        Ok(album)
    }
}

/// Render the driver-assigned `_id` as a plain string.
fn surrogate_id(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

/// Relaxed extended JSON, except that ObjectIds at any depth render as their
/// plain hex string, matching the id returned from an insert.
fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(doc) => Value::Object(
            doc.into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect(),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn object_id_renders_as_hex() {
        let oid = ObjectId::new();
        assert_eq!(surrogate_id(Bson::ObjectId(oid)), oid.to_hex());
    }

    #[test]
    fn string_id_is_unquoted() {
        assert_eq!(surrogate_id(Bson::String("abc".into())), "abc");
    }

    #[test]
    fn listed_documents_carry_hex_object_ids() {
        let oid = ObjectId::new();
        let nested = ObjectId::new();
        let doc = doc! {
            "_id": oid,
            "id": "1",
            "price": 9.99,
            "refs": [nested],
        };
        let value = bson_to_json(Bson::Document(doc));
        assert_eq!(
            value,
            serde_json::json!({
                "_id": oid.to_hex(),
                "id": "1",
                "price": 9.99,
                "refs": [nested.to_hex()],
            })
        );
        assert_eq!(value["_id"], surrogate_id(Bson::ObjectId(oid)));
    }

    #[test]
    fn other_ids_use_display_form() {
        assert_eq!(surrogate_id(Bson::Int32(7)), "7");
    }
}
