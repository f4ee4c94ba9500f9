use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::EngineError;
use crate::models::{Category, KeywordRule, Transaction};

/// Keyword categorizer. Rules are held longest pattern first so a specific
/// keyword ("amazon prime") is tried before a generic one ("amazon"); rules of
/// equal length keep their declaration order.
#[derive(Debug, Clone)]
pub(crate) struct Categorizer {
    rules: Vec<CompiledRule>,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    specificity: usize,
    matcher: Matcher,
    category: Category,
}

#[derive(Debug, Clone)]
enum Matcher {
    /// Normalized keyword, matched as a substring of the normalized description.
    Contains(String),
    /// Case-insensitive regex, matched against the raw description.
    Regex(Regex),
}

impl Categorizer {
    pub(crate) fn new(rules: &[KeywordRule]) -> Result<Self, EngineError> {
        let mut compiled = rules
            .iter()
            .filter(|r| r.category.is_categorized())
            .map(|r| {
                let (matcher, specificity) = if r.is_regex {
                    let regex = RegexBuilder::new(&r.pattern)
                        .case_insensitive(true)
                        .build()
                        .map_err(|e| EngineError::InvalidKeywordRule {
                            pattern: r.pattern.clone(),
                            reason: e.to_string(),
                        })?;
                    (Matcher::Regex(regex), r.pattern.chars().count())
                } else {
                    let keyword = normalize(&r.pattern);
                    let len = keyword.chars().count();
                    (Matcher::Contains(keyword), len)
                };
                Ok(CompiledRule {
                    specificity,
                    matcher,
                    category: r.category.clone(),
                })
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        // Stable: ties stay in declaration order.
        compiled.sort_by(|a, b| b.specificity.cmp(&a.specificity));

        Ok(Self { rules: compiled })
    }

    pub(crate) fn len(&self) -> usize {
        self.rules.len()
    }

    /// Resolve a description to a category. Never fails: anything without a
    /// matching rule, including an empty description, lands in `Other`.
    pub(crate) fn categorize(&self, description: &str) -> Category {
        let normalized = normalize(description);
        if normalized.is_empty() {
            return Category::Other;
        }

        for rule in &self.rules {
            let matched = match &rule.matcher {
                Matcher::Contains(keyword) => {
                    !keyword.is_empty() && normalized.contains(keyword.as_str())
                }
                Matcher::Regex(re) => re.is_match(description),
            };

            if matched {
                return rule.category.clone();
            }
        }

        Category::Other
    }

    pub(crate) fn categorize_batch(&self, transactions: &mut [Transaction]) {
        for txn in transactions.iter_mut() {
            txn.category = self.categorize(&txn.description);
        }
        let fallback = transactions
            .iter()
            .filter(|t| t.category == Category::Other)
            .count();
        debug!(
            total = transactions.len(),
            fallback,
            rules = self.rules.len(),
            "categorized transactions"
        );
    }
}

/// Lower-case, turn every non-alphanumeric run into a single space, trim.
/// `"AMAZON.COM*Prime  #12"` becomes `"amazon com prime 12"`.
pub(crate) fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Suggest a keyword from a description the user assigned by hand.
pub(crate) fn suggest_keyword(description: &str) -> String {
    // Extract the most likely merchant/vendor name
    let cleaned = description
        .to_uppercase()
        .replace(|c: char| c.is_ascii_digit(), "")
        .replace('#', "")
        .replace('*', " ")
        .trim()
        .to_string();

    // Take the first meaningful word(s)
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    let keyword = if words.len() >= 2 {
        format!("{} {}", words[0], words[1])
    } else if !words.is_empty() {
        words[0].to_string()
    } else {
        description.trim().to_string()
    };

    keyword.to_lowercase()
}
