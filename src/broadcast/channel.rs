use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A named broadcast topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Orders,
    Music,
    /// Any other topic, registered the first time someone subscribes to it.
    Named(String),
}

impl Channel {
    pub fn as_str(&self) -> &str {
        match self {
            Channel::Orders => "orders",
            Channel::Music => "music",
            Channel::Named(name) => name,
        }
    }
}

impl From<&str> for Channel {
    fn from(name: &str) -> Self {
        match name {
            "orders" => Channel::Orders,
            "music" => Channel::Music,
            other => Channel::Named(other.to_string()),
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
