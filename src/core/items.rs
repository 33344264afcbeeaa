use gray_matter::engine::YAML;
use gray_matter::Matter;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{IssueBatchError, ItemLoadError};
use crate::models::{RawWorkItem, WorkItemSpec};

/// Frontmatter of a Markdown item file
#[derive(Debug, Deserialize)]
struct ItemFrontmatter {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    labels: Vec<String>,
}

/// Load work items from `path`.
///
/// - a directory: every non-underscore `.md` file, in file name order
/// - a `.md` file: one item, title and labels from its frontmatter
/// - anything else: a JSON array of `{title, body, labels}` records
pub fn load_items(path: &Path) -> Result<Vec<WorkItemSpec>, IssueBatchError> {
    if !path.exists() {
        return Err(ItemLoadError::NotFound(path.to_path_buf()).into());
    }

    let items = if path.is_dir() {
        load_markdown_dir(path)?
    } else if is_markdown(path) {
        vec![load_markdown_file(path, 0)?]
    } else {
        load_json_file(path)?
    };

    debug!("Loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

/// Parse a JSON array of item records
pub fn parse_json_items(path: &Path, contents: &str) -> Result<Vec<WorkItemSpec>, ItemLoadError> {
    let raw: Vec<RawWorkItem> = serde_json::from_str(contents)
        .map_err(|e| ItemLoadError::Json(path.to_path_buf(), e))?;

    raw.into_iter()
        .enumerate()
        .map(|(index, record)| {
            WorkItemSpec::try_from(record).map_err(|source| ItemLoadError::InvalidItem {
                path: path.to_path_buf(),
                index,
                source,
            })
        })
        .collect()
}

/// Parse one Markdown document with YAML frontmatter
pub fn parse_markdown_item(
    path: &Path,
    index: usize,
    contents: &str,
) -> Result<WorkItemSpec, ItemLoadError> {
    let matter = Matter::<YAML>::new();
    let parsed = matter.parse(contents);

    let data = parsed.data.ok_or_else(|| {
        ItemLoadError::FrontmatterError(path.to_path_buf(), "No frontmatter found".to_string())
    })?;
    let front: ItemFrontmatter = data
        .deserialize()
        .map_err(|e| ItemLoadError::FrontmatterError(path.to_path_buf(), e.to_string()))?;

    let raw = RawWorkItem {
        title: front.title,
        body: Some(parsed.content.trim().to_string()),
        labels: front.labels,
    };

    WorkItemSpec::try_from(raw).map_err(|source| ItemLoadError::InvalidItem {
        path: path.to_path_buf(),
        index,
        source,
    })
}

fn load_json_file(path: &Path) -> Result<Vec<WorkItemSpec>, ItemLoadError> {
    let contents = read(path)?;
    parse_json_items(path, &contents)
}

fn load_markdown_file(path: &Path, index: usize) -> Result<WorkItemSpec, ItemLoadError> {
    let contents = read(path)?;
    parse_markdown_item(path, index, &contents)
}

fn load_markdown_dir(dir: &Path) -> Result<Vec<WorkItemSpec>, ItemLoadError> {
    let entries = fs::read_dir(dir).map_err(|e| ItemLoadError::ReadError(dir.to_path_buf(), e))?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| ItemLoadError::ReadError(dir.to_path_buf(), e))?
            .path();
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        // Underscore-prefixed files are notes, not items
        if path.is_file() && !filename.starts_with('_') && is_markdown(&path) {
            files.push(path);
        }
    }
    files.sort();
    debug!("Found {} item files in {}", files.len(), dir.display());

    files
        .iter()
        .enumerate()
        .map(|(index, file)| load_markdown_file(file, index))
        .collect()
}

fn read(path: &Path) -> Result<String, ItemLoadError> {
    fs::read_to_string(path).map_err(|e| ItemLoadError::ReadError(path.to_path_buf(), e))
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md"))
}
