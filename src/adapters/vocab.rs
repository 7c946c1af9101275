//! Ingredient token ids for the set-completion model.

use crate::error::{ErrorContext, ModelErrorKind, RecipeIntelError, Result};
use crate::matching::normalize;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;
use xxhash_rust::xxh3::xxh3_64;

/// Token id reserved for padding
pub const PADDING_TOKEN: u32 = 0;

/// Name ↔ id mapping shipped alongside a set-completion artifact.
///
/// On disk this is a JSON object `{"milk": 1, "eggs": 2, ...}`.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    by_name: IndexMap<String, u32>,
    by_id: HashMap<u32, String>,
}

impl Vocabulary {
    /// Build from `(name, id)` pairs; names are normalized.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut vocab = Self::default();
        for (name, id) in pairs {
            let name = normalize(name.as_ref());
            if name.is_empty() || id == PADDING_TOKEN {
                continue;
            }
            vocab.by_id.insert(id, name.clone());
            vocab.by_name.insert(name, id);
        }
        vocab
    }

    /// Parse the JSON object form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: IndexMap<String, u32> = serde_json::from_str(json).map_err(|e| {
            RecipeIntelError::model(
                "parsing vocabulary",
                ModelErrorKind::MalformedArtifact(e.to_string()),
            )
        })?;
        Ok(Self::from_pairs(raw))
    }

    /// Load the JSON object form from a file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RecipeIntelError::artifact_not_found(path));
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| RecipeIntelError::io(path, e))?;
        Self::from_json_str(&content).with_context(|| format!("loading {}", path.display()))
    }

    /// Id for a normalized ingredient name
    #[must_use]
    pub fn token_id(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    /// Name for a token id
    #[must_use]
    pub fn name_of(&self, id: u32) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// Number of named entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the vocabulary is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Largest id in use
    #[must_use]
    pub fn max_id(&self) -> Option<u32> {
        self.by_id.keys().copied().max()
    }
}

/// Placeholder token id for names without a vocabulary entry.
///
/// Maps into `[1, vocab_size - 1]`. Collisions are expected and there is no
/// inverse, so ids produced this way never become suggestions.
#[must_use]
pub fn hashed_token_id(name: &str, vocab_size: usize) -> u32 {
    if vocab_size <= 1 {
        return PADDING_TOKEN;
    }
    let buckets = (vocab_size - 1) as u64;
    (xxh3_64(name.as_bytes()) % buckets + 1) as u32
}
