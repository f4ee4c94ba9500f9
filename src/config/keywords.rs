use anyhow::{Context, Result};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::models::{Category, KeywordRule};

/// Keywords written with this prefix are compiled as regular expressions.
pub(crate) const REGEX_PREFIX: &str = "re:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryKeywords {
    pub(crate) name: String,
    pub(crate) keywords: Vec<String>,
}

/// The user's `category -> [keywords]` mapping.
///
/// Stored on disk as a JSON object. Declaration order is significant (it
/// breaks ties between equally long keywords), so entries are kept in a Vec
/// and serialized in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeywordMap {
    entries: Vec<CategoryKeywords>,
}

impl Default for KeywordMap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordMap {
    /// A fresh mapping with just the `Uncategorized` bucket.
    pub(crate) fn new() -> Self {
        Self {
            entries: vec![CategoryKeywords {
                name: "Uncategorized".into(),
                keywords: Vec::new(),
            }],
        }
    }

    /// Build from `(keyword, category)` pairs, in order.
    #[cfg(test)]
    pub(crate) fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut map = Self::new();
        for (keyword, category) in pairs {
            map.add_keyword(category, keyword);
        }
        map
    }

    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read categories file: {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Invalid categories file: {}", path.display()))
    }

    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write categories file: {}", path.display()))?;
        info!(path = %path.display(), categories = self.entries.len(), "saved categories");
        Ok(())
    }

    pub(crate) fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Expected an object of category names to keyword lists")
    }

    pub(crate) fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize categories")
    }

    pub(crate) fn entries(&self) -> &[CategoryKeywords] {
        &self.entries
    }

    pub(crate) fn contains_category(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Returns false if a category with that name (any case) already exists.
    pub(crate) fn add_category(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains_category(name) {
            return false;
        }
        self.entries.push(CategoryKeywords {
            name: name.to_string(),
            keywords: Vec::new(),
        });
        true
    }

    /// Attach a keyword to a category, creating the category if needed.
    /// Returns false for a blank or already-present keyword.
    pub(crate) fn add_keyword(&mut self, category: &str, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return false;
        }
        self.add_category(category);
        let Some(idx) = self.find(category) else {
            return false;
        };
        let entry = &mut self.entries[idx];
        if entry.keywords.iter().any(|k| k == keyword) {
            return false;
        }
        entry.keywords.push(keyword.to_string());
        true
    }

    /// Flatten into rules in declaration order. Keywords filed under
    /// `Uncategorized` are never applied.
    pub(crate) fn rules(&self) -> Vec<KeywordRule> {
        self.entries
            .iter()
            .map(|entry| (Category::named(&entry.name), &entry.keywords))
            .filter(|(category, _)| category.is_categorized())
            .flat_map(|(category, keywords)| {
                keywords.iter().map(move |kw| match kw.strip_prefix(REGEX_PREFIX) {
                    Some(pattern) => {
                        KeywordRule::new_regex(pattern.trim().to_string(), category.clone())
                    }
                    None => KeywordRule::new_contains(kw.clone(), category.clone()),
                })
            })
            .collect()
    }

    fn find(&self, name: &str) -> Option<usize> {
        let lower = name.trim().to_lowercase();
        self.entries
            .iter()
            .position(|e| e.name.to_lowercase() == lower)
    }
}

impl Serialize for KeywordMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|e| (&e.name, &e.keywords)))
    }
}

impl<'de> Deserialize<'de> for KeywordMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(KeywordMapVisitor)
    }
}

struct KeywordMapVisitor;

impl<'de> Visitor<'de> for KeywordMapVisitor {
    type Value = KeywordMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of category names to keyword lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<KeywordMap, A::Error> {
        let mut map = KeywordMap { entries: Vec::new() };
        while let Some((name, keywords)) = access.next_entry::<String, Vec<String>>()? {
            map.add_category(&name);
            for keyword in &keywords {
                map.add_keyword(&name, keyword);
            }
        }
        Ok(map)
    }
}
