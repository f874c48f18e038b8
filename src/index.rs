//! Index Builder.
//!
//! Reads every `*.json` recipe under `docs/recipes/` and writes the aggregate
//! `docs/index.json` the site's listing and search pages load:
//!
//! ```json
//! [
//!   {
//!     "title": { "en": "apple Pie" },
//!     "categories": ["baking"],
//!     "path": "recipes/apple-pie.json",
//!     "image": "images/apple-pie.webp",
//!     "author": "",
//!     "ingredient_keys": ["flour", "apple"]
//!   }
//! ]
//! ```
//!
//! Entries are ordered by their default-language title, case-insensitively.
//! A malformed recipe is reported and left out. A recipe without a title
//! aborts the whole run and leaves the previous index untouched.

use crate::config::IndexConfig;
use crate::recipe::{RecipeDocument, RecipeError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Recipe directory not found: {}", .0.display())]
    RecipesDirNotFound(PathBuf),
    #[error("Recipe has no title: {}", .0.display())]
    MissingTitle(PathBuf),
}

/// One recipe's summary in `index.json`. Field order is the output order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Language code to title, in the recipe's own order.
    pub title: Map<String, Value>,
    pub categories: Vec<String>,
    pub path: String,
    pub image: String,
    pub author: String,
    pub ingredient_keys: Vec<String>,
}

impl IndexEntry {
    pub fn from_recipe(recipe: &RecipeDocument, path: String, default_lang: &str) -> Self {
        Self {
            title: recipe.title.localize(default_lang),
            categories: recipe.categories.clone(),
            path,
            image: recipe.image.clone(),
            author: recipe.author.clone(),
            ingredient_keys: recipe.ingredients.keys(),
        }
    }

    /// Lowercased title in `lang`, empty when that language is missing.
    pub fn sort_key(&self, lang: &str) -> String {
        self.title
            .get(lang)
            .and_then(Value::as_str)
            .map(str::to_lowercase)
            .unwrap_or_default()
    }
}

/// Progress reported while building the index.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexEvent {
    Started { recipes_dir: PathBuf },
    Added { file: String, path: String },
    Skipped { file: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub written: usize,
    pub skipped: usize,
    pub output: PathBuf,
}

/// Build and write the aggregate index for the docs tree at `root`.
pub fn build_index(
    root: &Path,
    config: &IndexConfig,
    mut on_event: impl FnMut(IndexEvent),
) -> Result<IndexSummary, IndexError> {
    let recipes_dir = root.join(&config.recipes_dir);
    if !recipes_dir.is_dir() {
        return Err(IndexError::RecipesDirNotFound(recipes_dir));
    }

    on_event(IndexEvent::Started {
        recipes_dir: recipes_dir.clone(),
    });

    let mut entries = Vec::new();
    let mut skipped = 0;

    for (file, path) in recipe_files(&recipes_dir)? {
        let bytes = fs::read(&path)?;
        let recipe = match RecipeDocument::from_slice(&bytes) {
            Ok(recipe) => recipe,
            Err(RecipeError::MissingTitle) => return Err(IndexError::MissingTitle(path)),
            Err(e) => {
                skipped += 1;
                on_event(IndexEvent::Skipped {
                    file,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let entry_path = entry_path(&config.path_prefix, &file);
        on_event(IndexEvent::Added {
            file,
            path: entry_path.clone(),
        });
        entries.push(IndexEntry::from_recipe(
            &recipe,
            entry_path,
            &config.default_language,
        ));
    }

    sort_entries(&mut entries, &config.default_language);

    let output = root.join(&config.output);
    fs::write(&output, serde_json::to_string_pretty(&entries)?)?;

    Ok(IndexSummary {
        written: entries.len(),
        skipped,
        output,
    })
}

/// Stable, case-insensitive sort on the default-language title.
pub fn sort_entries(entries: &mut [IndexEntry], lang: &str) {
    entries.sort_by_cached_key(|entry| entry.sort_key(lang));
}

/// `*.json` files directly inside `dir`, sorted by file name.
///
/// Only the exact lowercase `.json` suffix counts, and symlinks are followed.
/// Names that are not valid UTF-8 cannot be written into the index and are
/// ignored.
fn recipe_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, IndexError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let path = entry.path();
        if name.ends_with(".json") && path.is_file() {
            files.push((name, path));
        }
    }
    files.sort();
    Ok(files)
}

fn entry_path(prefix: &str, file: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        file.to_string()
    } else {
        format!("{prefix}/{file}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{setup_fixtures, write_recipe};
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn recipes_site() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("recipes")).unwrap();
        tmp
    }

    fn build(root: &Path) -> (IndexSummary, Vec<IndexEvent>) {
        let mut events = Vec::new();
        let summary = build_index(root, &IndexConfig::default(), |e| events.push(e)).unwrap();
        (summary, events)
    }

    fn read_index(root: &Path) -> Vec<IndexEntry> {
        let text = fs::read_to_string(root.join("index.json")).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn flat_ingredient_keys_in_encounter_order() {
        let tmp = recipes_site();
        write_recipe(
            tmp.path(),
            "cake.json",
            &json!({"title": "Cake", "ingredients": [{"ingredient": "flour"}, {"ingredient": "egg"}]}),
        );

        build(tmp.path());

        assert_eq!(read_index(tmp.path())[0].ingredient_keys, vec!["flour", "egg"]);
    }

    #[test]
    fn grouped_ingredient_keys_are_flattened() {
        let tmp = recipes_site();
        write_recipe(
            tmp.path(),
            "cake.json",
            &json!({"title": "Cake", "ingredients": [
                {"group": "Dry", "items": [{"ingredient": "flour"}]},
                {"group": "Wet", "items": [{"ingredient": "egg"}]}
            ]}),
        );

        build(tmp.path());

        assert_eq!(read_index(tmp.path())[0].ingredient_keys, vec!["flour", "egg"]);
    }

    #[test]
    fn plain_title_becomes_english_mapping() {
        let tmp = recipes_site();
        write_recipe(tmp.path(), "cake.json", &json!({"title": "Cake"}));

        build(tmp.path());

        let raw: Value =
            serde_json::from_str(&fs::read_to_string(tmp.path().join("index.json")).unwrap())
                .unwrap();
        assert_eq!(raw[0]["title"], json!({"en": "Cake"}));
    }

    #[test]
    fn entries_sorted_case_insensitively() {
        let tmp = recipes_site();
        write_recipe(tmp.path(), "a.json", &json!({"title": {"en": "Banana Bread"}}));
        write_recipe(tmp.path(), "b.json", &json!({"title": {"en": "apple Pie"}}));

        build(tmp.path());

        let titles: Vec<_> = read_index(tmp.path())
            .into_iter()
            .map(|e| e.sort_key("en"))
            .collect();
        assert_eq!(titles, vec!["apple pie", "banana bread"]);
    }

    #[test]
    fn entries_without_default_language_sort_first() {
        let tmp = recipes_site();
        write_recipe(tmp.path(), "a.json", &json!({"title": {"en": "Aioli"}}));
        write_recipe(tmp.path(), "b.json", &json!({"title": {"fr": "Crème brûlée"}}));

        build(tmp.path());

        let index = read_index(tmp.path());
        assert_eq!(index[0].path, "recipes/b.json");
        assert_eq!(index[1].path, "recipes/a.json");
    }

    #[test]
    fn equal_titles_keep_file_order() {
        let mut entries: Vec<IndexEntry> = ["x.json", "y.json"]
            .into_iter()
            .map(|file| IndexEntry {
                title: Map::from_iter([("en".to_string(), json!("Soup"))]),
                categories: vec![],
                path: file.into(),
                image: String::new(),
                author: String::new(),
                ingredient_keys: vec![],
            })
            .collect();
        entries[1].title.insert("en".into(), "SOUP".into());

        sort_entries(&mut entries, "en");

        assert_eq!(entries[0].path, "x.json");
        assert_eq!(entries[1].path, "y.json");
    }

    #[test]
    fn malformed_recipe_is_skipped() {
        let tmp = recipes_site();
        write_recipe(tmp.path(), "good.json", &json!({"title": "Good"}));
        fs::write(tmp.path().join("recipes/bad.json"), "{ not json").unwrap();

        let (summary, events) = build(tmp.path());

        assert_eq!(summary.written, 1);
        assert_eq!(summary.skipped, 1);
        assert!(events
            .iter()
            .any(|e| matches!(e, IndexEvent::Skipped { file, .. } if file == "bad.json")));
        let index = read_index(tmp.path());
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].path, "recipes/good.json");
    }

    #[test]
    fn loosely_typed_recipes_are_still_indexed() {
        let tmp = recipes_site();
        write_recipe(tmp.path(), "a.json", &json!({"title": "Soup", "categories": "dinner"}));
        write_recipe(
            tmp.path(),
            "b.json",
            &json!({"title": "Stew", "ingredients": {"ingredient": "beef"}}),
        );
        write_recipe(tmp.path(), "c.json", &json!({"title": {"en": "Pie", "de": null}}));

        let (summary, _) = build(tmp.path());

        assert_eq!(summary.written, 3);
        assert_eq!(summary.skipped, 0);
        let index = read_index(tmp.path());
        let pie = index.iter().find(|e| e.path == "recipes/c.json").unwrap();
        assert_eq!(Value::Object(pie.title.clone()), json!({"en": "Pie"}));
        let soup = index.iter().find(|e| e.path == "recipes/a.json").unwrap();
        assert!(soup.categories.is_empty());
        let stew = index.iter().find(|e| e.path == "recipes/b.json").unwrap();
        assert!(stew.ingredient_keys.is_empty());
    }

    #[test]
    fn invalid_title_is_skipped_with_reason() {
        let tmp = recipes_site();
        write_recipe(tmp.path(), "odd.json", &json!({"title": 42}));

        let (summary, events) = build(tmp.path());

        assert_eq!(summary.skipped, 1);
        assert!(events.iter().any(|e| matches!(
            e,
            IndexEvent::Skipped { file, reason } if file == "odd.json" && !reason.contains("invalid JSON")
        )));
    }

    #[test]
    fn localized_title_keeps_language_order() {
        let tmp = recipes_site();
        write_recipe(
            tmp.path(),
            "pie.json",
            &json!({"title": {"en": "Pie", "de": "Kuchen", "fr": "Tarte"}}),
        );

        build(tmp.path());

        let text = fs::read_to_string(tmp.path().join("index.json")).unwrap();
        let en = text.find("\"en\"").unwrap();
        let de = text.find("\"de\"").unwrap();
        let fr = text.find("\"fr\"").unwrap();
        assert!(en < de && de < fr);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_recipes_are_read() {
        let tmp = recipes_site();
        let shared = tmp.path().join("shared.json");
        fs::write(&shared, r#"{"title": "Linked"}"#).unwrap();
        std::os::unix::fs::symlink(&shared, tmp.path().join("recipes/linked.json")).unwrap();

        let (summary, _) = build(tmp.path());

        assert_eq!(summary.written, 1);
        assert_eq!(read_index(tmp.path())[0].path, "recipes/linked.json");
    }

    #[test]
    fn non_json_files_are_ignored() {
        let tmp = recipes_site();
        write_recipe(tmp.path(), "good.json", &json!({"title": "Good"}));
        fs::write(tmp.path().join("recipes/notes.txt"), "{}").unwrap();
        fs::write(tmp.path().join("recipes/upper.JSON"), "{}").unwrap();
        fs::create_dir_all(tmp.path().join("recipes/drafts.json")).unwrap();

        let (summary, _) = build(tmp.path());

        assert_eq!(summary.written, 1);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn missing_recipes_dir_fails_without_writing() {
        let tmp = TempDir::new().unwrap();

        let result = build_index(tmp.path(), &IndexConfig::default(), |_| {});

        assert!(matches!(result, Err(IndexError::RecipesDirNotFound(_))));
        assert!(!tmp.path().join("index.json").exists());
    }

    #[test]
    fn missing_title_aborts_and_keeps_previous_index() {
        let tmp = recipes_site();
        fs::write(tmp.path().join("index.json"), "[]").unwrap();
        write_recipe(tmp.path(), "good.json", &json!({"title": "Good"}));
        write_recipe(tmp.path(), "untitled.json", &json!({"author": "Sam"}));

        let result = build_index(tmp.path(), &IndexConfig::default(), |_| {});

        match result {
            Err(IndexError::MissingTitle(path)) => {
                assert_eq!(path, tmp.path().join("recipes/untitled.json"))
            }
            other => panic!("expected MissingTitle, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(tmp.path().join("index.json")).unwrap(), "[]");
    }

    #[test]
    fn output_is_pretty_and_keeps_non_ascii() {
        let tmp = recipes_site();
        write_recipe(tmp.path(), "b.json", &json!({"title": {"fr": "Crème brûlée"}}));

        build(tmp.path());

        let text = fs::read_to_string(tmp.path().join("index.json")).unwrap();
        assert!(text.contains("Crème brûlée"));
        assert!(text.contains("\n  {\n    \"title\": {"));
    }

    #[test]
    fn output_field_order_and_defaults() {
        let tmp = recipes_site();
        write_recipe(tmp.path(), "toast.json", &json!({"title": "Toast"}));

        build(tmp.path());

        let text = fs::read_to_string(tmp.path().join("index.json")).unwrap();
        let positions: Vec<_> = [
            "\"title\"",
            "\"categories\"",
            "\"path\"",
            "\"image\"",
            "\"author\"",
            "\"ingredient_keys\"",
        ]
        .iter()
        .map(|key| text.find(key).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(
            read_index(tmp.path())[0],
            IndexEntry {
                title: Map::from_iter([("en".to_string(), json!("Toast"))]),
                categories: vec![],
                path: "recipes/toast.json".into(),
                image: String::new(),
                author: String::new(),
                ingredient_keys: vec![],
            }
        );
    }

    #[test]
    fn rebuild_replaces_previous_index() {
        let tmp = recipes_site();
        fs::write(tmp.path().join("index.json"), "[{\"stale\": true}]").unwrap();
        write_recipe(tmp.path(), "a.json", &json!({"title": "A"}));

        build(tmp.path());

        assert_eq!(read_index(tmp.path()).len(), 1);
    }

    #[test]
    fn configured_prefix_and_language() {
        let tmp = recipes_site();
        write_recipe(tmp.path(), "kuchen.json", &json!({"title": "Kuchen"}));
        let config = IndexConfig {
            path_prefix: "data/recipes/".into(),
            default_language: "de".into(),
            ..IndexConfig::default()
        };

        build_index(tmp.path(), &config, |_| {}).unwrap();

        let entry = &read_index(tmp.path())[0];
        assert_eq!(entry.path, "data/recipes/kuchen.json");
        assert_eq!(entry.title["de"], "Kuchen");
    }

    #[test]
    fn fixture_site_builds() {
        let tmp = setup_fixtures();
        let root = tmp.path();

        let (summary, events) = build(root);

        assert_eq!(summary.written, 3);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.output, root.join("index.json"));
        let added: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                IndexEvent::Added { file, .. } => Some(file.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(added, vec!["apple-pie.json", "banana-bread.json", "creme-brulee.json"]);

        let paths: Vec<_> = read_index(root).into_iter().map(|e| e.path).collect();
        assert_eq!(
            paths,
            vec![
                "recipes/creme-brulee.json",
                "recipes/apple-pie.json",
                "recipes/banana-bread.json",
            ]
        );
    }
}
