//! Recipe document model.
//!
//! Recipe files under `docs/recipes/` come in a few historical shapes. The
//! title is either a plain string or a per-language mapping, and ingredients
//! are either a flat list or a list of named groups:
//!
//! ```json
//! { "title": "Apple Pie",
//!   "ingredients": [{ "ingredient": "flour" }, { "ingredient": "egg" }] }
//!
//! { "title": { "en": "Banana Bread", "de": "Bananenbrot" },
//!   "ingredients": [
//!     { "group": "Dry", "items": [{ "ingredient": "flour" }] },
//!     { "group": "Wet", "items": [{ "ingredient": "egg" }] } ] }
//! ```
//!
//! Both shapes are resolved once, when the document is loaded, into [`Title`]
//! and [`Ingredients`] variants. Nothing downstream inspects raw JSON.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("document is not a JSON object")]
    NotAnObject,
    #[error("missing required field `title`")]
    MissingTitle,
    #[error("`title` must be a string or a language mapping")]
    InvalidTitle,
}

/// A recipe title, plain or localized.
#[derive(Debug, Clone, PartialEq)]
pub enum Title {
    Plain(String),
    /// Language code to title, in document order. Values are always strings.
    Localized(Map<String, Value>),
}

impl Title {
    /// Read a raw `title` value. `None` when it is `null`.
    ///
    /// Translations that are not strings are dropped; the rest keep their
    /// document order.
    pub fn from_value(value: Value) -> Result<Option<Self>, RecipeError> {
        match value {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(Title::Plain(text))),
            Value::Object(map) => Ok(Some(Title::Localized(
                map.into_iter().filter(|(_, v)| v.is_string()).collect(),
            ))),
            _ => Err(RecipeError::InvalidTitle),
        }
    }

    /// The title as a language mapping; a plain title is filed under `default_lang`.
    pub fn localize(&self, default_lang: &str) -> Map<String, Value> {
        match self {
            Title::Plain(text) => {
                Map::from_iter([(default_lang.to_string(), Value::String(text.clone()))])
            }
            Title::Localized(map) => map.clone(),
        }
    }
}

/// One ingredient line, reduced to the key used for search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientEntry {
    pub ingredient: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientGroup {
    pub group: Option<String>,
    pub items: Vec<IngredientEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingredients {
    Flat(Vec<IngredientEntry>),
    Grouped(Vec<IngredientGroup>),
}

impl Default for Ingredients {
    fn default() -> Self {
        Ingredients::Flat(Vec::new())
    }
}

impl Ingredients {
    /// Normalize a raw `ingredients` array.
    ///
    /// The list is grouped when its first element is an object with a `group`
    /// key; otherwise it is flat. Groups without an `items` array and entries
    /// without a string `ingredient` are dropped.
    pub fn from_values(values: &[Value]) -> Self {
        let grouped = values
            .first()
            .and_then(Value::as_object)
            .is_some_and(|first| first.contains_key("group"));

        if grouped {
            let groups = values
                .iter()
                .filter_map(Value::as_object)
                .filter_map(|group| {
                    let items = group.get("items")?.as_array()?;
                    Some(IngredientGroup {
                        group: group.get("group").and_then(Value::as_str).map(String::from),
                        items: entries(items),
                    })
                })
                .collect();
            Ingredients::Grouped(groups)
        } else {
            Ingredients::Flat(entries(values))
        }
    }

    /// Every ingredient key, in document order.
    pub fn keys(&self) -> Vec<String> {
        match self {
            Ingredients::Flat(items) => items.iter().map(|e| e.ingredient.clone()).collect(),
            Ingredients::Grouped(groups) => groups
                .iter()
                .flat_map(|g| g.items.iter().map(|e| e.ingredient.clone()))
                .collect(),
        }
    }
}

fn entries(values: &[Value]) -> Vec<IngredientEntry> {
    values
        .iter()
        .filter_map(|value| value.get("ingredient")?.as_str())
        .map(|ingredient| IngredientEntry {
            ingredient: ingredient.to_string(),
        })
        .collect()
}

/// A parsed recipe with optional fields defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDocument {
    pub title: Title,
    pub categories: Vec<String>,
    pub image: String,
    pub author: String,
    pub ingredients: Ingredients,
}

impl RecipeDocument {
    /// Parse a recipe from raw bytes.
    ///
    /// Only malformed JSON, a non-object root and an unusable title are
    /// errors. Optional fields of the wrong type read as their empty default,
    /// and `ingredients` that is not an array has no keys. Unknown fields
    /// (steps, notes, servings...) are ignored.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RecipeError> {
        let Value::Object(mut fields) = serde_json::from_slice::<Value>(bytes)? else {
            return Err(RecipeError::NotAnObject);
        };

        let title = match fields.remove("title") {
            Some(value) => Title::from_value(value)?,
            None => None,
        }
        .ok_or(RecipeError::MissingTitle)?;

        let categories = match fields.get("categories") {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        };
        let ingredients = match fields.get("ingredients") {
            Some(Value::Array(values)) => Ingredients::from_values(values),
            _ => Ingredients::default(),
        };

        Ok(Self {
            title,
            categories,
            image: string_field(&fields, "image"),
            author: string_field(&fields, "author"),
            ingredients,
        })
    }
}

/// A string field, or empty when absent or not a string.
fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
