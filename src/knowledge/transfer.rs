//! Whole-store export and import.
//!
//! Export is the persisted shape, pretty-printed. Import parses the payload,
//! checks its shape according to a [`ValidationMode`], and only then swaps the
//! store contents in one step. Any failure leaves the store untouched.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormatError;
use crate::knowledge::store::KnowledgeStore;
use crate::knowledge::types::{generate_article_id, Article};

/// How much of an import payload is shape-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Only the first element is spot-checked. Later elements are accepted as
    /// long as they are objects whose present fields have the right types;
    /// missing fields become empty. Compatible with files written by older tools.
    #[default]
    Shallow,
    /// Every element is checked and ids must be unique.
    Strict,
}

impl ValidationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shallow => "shallow",
            Self::Strict => "strict",
        }
    }
}

impl std::fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shallow" => Ok(Self::Shallow),
            "strict" => Ok(Self::Strict),
            _ => Err(format!("unknown validation mode: {s}")),
        }
    }
}

/// Serialize every article, keywords included, as indented JSON.
pub fn export_json(articles: &[Article]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(articles)
}

/// Parse and shape-check an import payload without touching any store.
pub fn validate_import(text: &str, mode: ValidationMode) -> Result<Vec<Article>, FormatError> {
    let root: Value = serde_json::from_str(text)?;

    let Value::Array(items) = root else {
        return Err(FormatError::Shape("root is not an array".into()));
    };

    match mode {
        ValidationMode::Shallow => {
            if let Some(first) = items.first() {
                check_article_shape(first).map_err(|e| FormatError::Shape(format!("element 0: {e}")))?;
            }
        }
        ValidationMode::Strict => {
            for (i, item) in items.iter().enumerate() {
                check_article_shape(item).map_err(|e| FormatError::Shape(format!("element {i}: {e}")))?;
            }
        }
    }

    let mut articles = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<Article>(item)
                .map_err(|e| FormatError::Shape(format!("element {i}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Unchecked elements may lack an id; give them one so lookups stay unambiguous.
    for (i, article) in articles.iter_mut().enumerate() {
        if article.id.trim().is_empty() {
            article.id = generate_article_id();
            tracing::debug!(element = i, id = %article.id, "assigned id to imported article");
        }
    }

    if mode == ValidationMode::Strict {
        let mut seen = HashSet::new();
        for article in &articles {
            if !seen.insert(article.id.as_str()) {
                return Err(FormatError::DuplicateId(article.id.clone()));
            }
        }
    }

    Ok(articles)
}

/// Validate `text` and, on success, replace the store contents and persist.
///
/// Returns the number of articles now in the store. An empty array is valid and
/// clears the knowledge base.
pub fn import_json(
    store: &mut KnowledgeStore,
    text: &str,
    mode: ValidationMode,
) -> Result<usize, FormatError> {
    let articles = validate_import(text, mode)?;
    let count = articles.len();
    store.replace_all(articles);
    tracing::info!(count, mode = %mode, "knowledge base imported");
    Ok(count)
}

/// `id`, `title`, `content` must be strings and `keywords` an array.
fn check_article_shape(value: &Value) -> Result<(), String> {
    let obj = value.as_object().ok_or("not an object")?;

    for field in ["id", "title", "content"] {
        match obj.get(field) {
            Some(Value::String(_)) => {}
            Some(_) => return Err(format!("`{field}` is not a string")),
            None => return Err(format!("missing `{field}`")),
        }
    }

    match obj.get("keywords") {
        Some(Value::Array(_)) => Ok(()),
        Some(_) => Err("`keywords` is not an array".into()),
        None => Err("missing `keywords`".into()),
    }
}
