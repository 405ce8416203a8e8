//! Corpus ingestion: JSON / JSONL recipe records into [`Recipe`] values.
//!
//! Document identifiers are assigned by position, so load order is kept stable: records in
//! file order, files in name order when a directory is given.

use crate::recipe::{RawRecipe, Recipe};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Parse a JSON document holding either an array of recipes or a single recipe.
pub fn parse_corpus(json: &str) -> Result<Vec<Recipe>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    match value {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .enumerate()
            .map(|(i, v)| -> Result<Recipe> {
                let raw: RawRecipe =
                    serde_json::from_value(v).with_context(|| format!("record {i}"))?;
                Ok(Recipe::from(raw))
            })
            .collect(),
        serde_json::Value::Object(_) => {
            let raw: RawRecipe = serde_json::from_value(value)?;
            Ok(vec![Recipe::from(raw)])
        }
        _ => bail!("expected a JSON array or object of recipes"),
    }
}

/// Parse JSONL: one recipe per line, blank lines ignored.
pub fn parse_corpus_lines(jsonl: &str) -> Result<Vec<Recipe>> {
    let mut recipes = Vec::new();
    for (lineno, line) in jsonl.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let raw: RawRecipe =
            serde_json::from_str(line).with_context(|| format!("line {}", lineno + 1))?;
        recipes.push(Recipe::from(raw));
    }
    Ok(recipes)
}

/// Load recipes from a `.json` / `.jsonl` file, or from every such file under a directory.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<Recipe>> {
    let path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if path.is_file() {
        files.push(path.to_path_buf());
    } else {
        bail!("corpus path {} does not exist", path.display());
    }

    let mut recipes = Vec::new();
    for file in files {
        let text = fs::read_to_string(&file)
            .with_context(|| format!("reading {}", file.display()))?;
        let batch = if extension(&file) == Some("jsonl") {
            parse_corpus_lines(&text)
        } else {
            parse_corpus(&text)
        }
        .with_context(|| format!("parsing {}", file.display()))?;
        tracing::debug!(file = %file.display(), records = batch.len(), "loaded corpus file");
        recipes.extend(batch);
    }
    tracing::info!(path = %path.display(), num_docs = recipes.len(), "loaded corpus");
    Ok(recipes)
}

fn extension(p: &Path) -> Option<&str> {
    p.extension().and_then(|s| s.to_str())
}
