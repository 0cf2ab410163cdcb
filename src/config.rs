//! Runtime configuration.
//!
//! Loaded from a TOML file whose path is taken from `TABLESIDE_CONFIG`. Every
//! section and field is optional and falls back to the values below.
//!
//! ```toml
//! [orders]
//! list_limit = 50
//!
//! [broadcast]
//! send_timeout_ms = 500
//!
//! [jukebox]
//! vote_threshold = 10
//! ```

use crate::model::{NowPlaying, Song};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "TABLESIDE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub actors: ActorConfig,
    pub orders: OrdersConfig,
    pub broadcast: BroadcastConfig,
    pub jukebox: JukeboxConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    /// Request queue capacity of each actor.
    pub buffer_size: usize,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self { buffer_size: 32 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrdersConfig {
    /// Most orders returned by a list query.
    pub list_limit: usize,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self { list_limit: 100 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BroadcastConfig {
    /// Upper bound on a single delivery.
    pub send_timeout_ms: u64,
    /// Outbound queue length of a [`ConnectionHandle`](crate::broadcast::ConnectionHandle).
    pub queue_capacity: usize,
}

impl BroadcastConfig {
    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            send_timeout_ms: 1000,
            queue_capacity: 64,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JukeboxConfig {
    /// Candidates per round, capped by the library size.
    pub round_size: usize,
    /// Total votes that close a round.
    pub vote_threshold: u32,
    /// Playing until the first round closes.
    pub idle_track: NowPlaying,
    pub library: Vec<Song>,
}

impl Default for JukeboxConfig {
    fn default() -> Self {
        Self {
            round_size: 5,
            vote_threshold: 5,
            idle_track: NowPlaying {
                title: "Keyifli Dakikalar".to_string(),
                artist: "Gastro Radyo".to_string(),
            },
            library: default_library(),
        }
    }
}

fn default_library() -> Vec<Song> {
    vec![
        Song::new(1, "Ateşe Düştüm", "Mert Demir"),
        Song::new(2, "Antidepresan", "Mabel Matiz"),
        Song::new(3, "Senden Daha Güzel", "Duman"),
        Song::new(4, "Bi Tek Ben Anlarım", "KÖFN"),
        Song::new(5, "Hercai", "Çelik"),
        Song::new(6, "Pusulam Rüzgar", "Melike Şahin"),
        Song::new(7, "Dön Desem", "Semicenk"),
        Song::new(8, "Gülpembe", "Barış Manço"),
        Song::new(9, "Ele Güne Karşı", "MFÖ"),
    ]
}

impl Config {
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Self::parse_toml(&content)
    }

    /// Reads `.env` if present, then loads the file named by `TABLESIDE_CONFIG`
    /// or falls back to defaults when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                info!(%path, "Loading config");
                Self::load(path)
            }
            Err(_) => {
                info!("{CONFIG_ENV} not set, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.actors.buffer_size == 0 {
            return Err(ConfigError::Invalid {
                field: "actors.buffer_size",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.orders.list_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "orders.list_limit",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.broadcast.send_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "broadcast.send_timeout_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.broadcast.queue_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "broadcast.queue_capacity",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.jukebox.round_size == 0 {
            return Err(ConfigError::Invalid {
                field: "jukebox.round_size",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.jukebox.vote_threshold == 0 {
            return Err(ConfigError::Invalid {
                field: "jukebox.vote_threshold",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.jukebox.library.is_empty() {
            return Err(ConfigError::Invalid {
                field: "jukebox.library",
                reason: "must contain at least one song".to_string(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.jukebox.library.iter().find(|s| !seen.insert(s.id)) {
            return Err(ConfigError::Invalid {
                field: "jukebox.library",
                reason: format!("duplicate id {}", dup.id),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.orders.list_limit, 100);
        assert_eq!(config.jukebox.round_size, 5);
        assert_eq!(config.jukebox.vote_threshold, 5);
        assert_eq!(config.jukebox.library.len(), 9);
        assert_eq!(config.broadcast.send_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = Config::parse_toml(
            r#"
            [orders]
            list_limit = 20

            [jukebox]
            vote_threshold = 3

            [[jukebox.library]]
            id = 10
            title = "Bir Derdim Var"
            artist = "mor ve ötesi"
            "#,
        )
        .unwrap();
        assert_eq!(config.orders.list_limit, 20);
        assert_eq!(config.jukebox.vote_threshold, 3);
        assert_eq!(config.jukebox.round_size, 5);
        assert_eq!(config.jukebox.library, vec![Song::new(10, "Bir Derdim Var", "mor ve ötesi")]);
        assert_eq!(config.actors.buffer_size, 32);
    }

    #[test]
    fn test_zero_threshold_is_rejected() {
        let err = Config::parse_toml("[jukebox]\nvote_threshold = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "jukebox.vote_threshold", .. }));
    }

    #[test]
    fn test_duplicate_song_ids_are_rejected() {
        let mut config = Config::default();
        config.jukebox.library.push(Song::new(1, "Again", "Someone"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "jukebox.library", .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        assert!(matches!(
            Config::parse_toml("[orders\nlist_limit = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        assert!(matches!(
            Config::load("/nonexistent/tableside.toml"),
            Err(ConfigError::Read(_))
        ));
    }
}
