/// Category label carried by a transaction.
///
/// Variant order doubles as display order: configured categories sort by
/// name, then the `Other` fallback, then anything still uncategorized.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Named(String),
    Other,
    Uncategorized,
}

impl Category {
    /// Build a label from a user-supplied name. The reserved names map onto
    /// their dedicated variants (case-insensitive).
    pub fn named(name: &str) -> Self {
        let trimmed = name.trim();
        match trimmed.to_lowercase().as_str() {
            "other" => Self::Other,
            "uncategorized" | "" => Self::Uncategorized,
            _ => Self::Named(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Other => "Other",
            Self::Uncategorized => "Uncategorized",
        }
    }

    pub fn is_categorized(&self) -> bool {
        !matches!(self, Self::Uncategorized)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
