pub mod album_payload;

pub use album_payload::AlbumPayload;
