use serde::{Deserialize, Serialize};

/// A short assertion distilled from raw turns. Never persisted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fact {
    pub content: String,
    #[serde(rename = "appearTime", alias = "appear_time")]
    pub appear_time: String,
    pub about: String,
}

impl Fact {
    /// A fact that only carries its content (the plain-string reply form).
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}
