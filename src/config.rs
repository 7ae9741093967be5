//! Runtime configuration sourced from the process environment.
//!
//! Values are layered with figment: built-in defaults first, then the
//! environment (optionally pre-populated from `.env` by the binary).

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::error::AlbumError;

pub const DEFAULT_COLLECTION: &str = "movies";

const ENV_KEYS: [&str; 4] = [
    "MONGODB_URI",
    "MONGO_DEFAULT_DATABASE",
    "MONGO_COLLECTION",
    "LOGLEVEL",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub mongodb_uri: String,
    /// Passed through to the driver on every request; not validated.
    pub mongo_default_database: String,
    pub mongo_collection: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mongodb_uri: String::new(),
            mongo_default_database: String::new(),
            mongo_collection: DEFAULT_COLLECTION.to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults merged with the recognised environment variables.
    ///
    /// Values are kept verbatim, so `2024` or `true` stay strings.
    pub fn figment() -> Figment {
        Env::raw().only(&ENV_KEYS).iter().fold(
            Figment::from(Serialized::defaults(Config::default())),
            |figment, (key, value)| {
                figment.merge(Serialized::default(
                    &key.as_str().to_ascii_lowercase(),
                    value,
                ))
            },
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, AlbumError> {
        let cfg: Config = figment.extract()?;
        if cfg.mongodb_uri.trim().is_empty() {
            return Err(AlbumError::MissingMongoUri);
        }
        Ok(cfg)
    }

    pub fn from_env() -> Result<Self, AlbumError> {
        Self::from_figment(Self::figment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn missing_uri_is_rejected() {
        let figment = Figment::from(Serialized::defaults(Config::default()));
        let err = Config::from_figment(figment).unwrap_err();
        assert!(matches!(err, AlbumError::MissingMongoUri));
    }

    #[test]
    fn blank_uri_is_rejected() {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Serialized::default("mongodb_uri", "   "));
        let err = Config::from_figment(figment).unwrap_err();
        assert!(matches!(err, AlbumError::MissingMongoUri));
    }

    #[test]
    fn reads_environment() {
        Jail::expect_with(|jail| {
            jail.set_env("MONGODB_URI", "mongodb://localhost:27017");
            jail.set_env("MONGO_DEFAULT_DATABASE", "records");
            jail.set_env("LOGLEVEL", "debug");

            let cfg = Config::from_env().expect("config should load");
            assert_eq!(cfg.mongodb_uri, "mongodb://localhost:27017");
            assert_eq!(cfg.mongo_default_database, "records");
            assert_eq!(cfg.mongo_collection, DEFAULT_COLLECTION);
            assert_eq!(cfg.loglevel, "debug");
            Ok(())
        });
    }

    #[test]
    fn scalar_looking_values_stay_strings() {
        Jail::expect_with(|jail| {
            jail.set_env("MONGODB_URI", "mongodb://db:27017");
            jail.set_env("MONGO_DEFAULT_DATABASE", "2024");
            jail.set_env("MONGO_COLLECTION", "007");
            jail.set_env("LOGLEVEL", "true");

            let cfg = Config::from_env().expect("config should load");
            assert_eq!(cfg.mongo_default_database, "2024");
            assert_eq!(cfg.mongo_collection, "007");
            assert_eq!(cfg.loglevel, "true");
            Ok(())
        });
    }

    #[test]
    fn collection_can_be_overridden() {
        Jail::expect_with(|jail| {
            jail.set_env("MONGODB_URI", "mongodb://db:27017");
            jail.set_env("MONGO_COLLECTION", "albums");

            let cfg = Config::from_env().expect("config should load");
            assert_eq!(cfg.mongo_collection, "albums");
            assert_eq!(cfg.mongo_default_database, "");
            Ok(())
        });
    }
}
