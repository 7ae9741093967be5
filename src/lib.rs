pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod types;

pub use config::Config;
pub use db::{AlbumStore, MemoryStore, MongoStore};
pub use error::AlbumError;
pub use types::Album;
