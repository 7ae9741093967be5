pub mod albums;

pub use albums::{create_album, get_album_by_id, list_albums};
