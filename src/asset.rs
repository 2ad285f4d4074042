//! Script asset wrapper with a stable cache identity

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// An immutable block of player script text.
///
/// The text is never executed, only pattern-matched. The fingerprint is
/// computed once from the content and serves as the cache identity token
/// for everything derived from this asset.
#[derive(Debug, Clone)]
pub struct ScriptAsset {
    text: String,
    fingerprint: u64,
}

impl ScriptAsset {
    /// Wrap raw script text, computing its content fingerprint
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        Self {
            fingerprint: hasher.finish(),
            text,
        }
    }

    /// Raw script text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Content fingerprint used as cache key component
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

impl From<&str> for ScriptAsset {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for ScriptAsset {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
