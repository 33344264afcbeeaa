use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::core::load_items;

/// Validation result
#[derive(Debug)]
pub struct ValidationResult {
    pub valid: bool,
    pub item_count: usize,
    pub label_counts: BTreeMap<String, usize>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validate an items file without contacting GitHub
pub fn validate_items(project_root: &Path, file: &PathBuf) -> ValidationResult {
    let mut result = ValidationResult {
        valid: true,
        item_count: 0,
        label_counts: BTreeMap::new(),
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    let items = match load_items(&project_root.join(file)) {
        Ok(items) => items,
        Err(e) => {
            result.errors.push(e.to_string());
            result.valid = false;
            return result;
        }
    };

    result.item_count = items.len();
    if items.is_empty() {
        result.warnings.push("No items found".to_string());
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, item) in items.iter().enumerate() {
        match seen.get(item.title.as_str()) {
            Some(first) => result.warnings.push(format!(
                "Item {}: duplicate title '{}' (first seen at item {}), both will be created",
                index + 1,
                item.title,
                first + 1
            )),
            None => {
                seen.insert(item.title.as_str(), index);
            }
        }
        if item.body.trim().is_empty() {
            result
                .warnings
                .push(format!("Item {}: '{}' has an empty body", index + 1, item.title));
        }
        for label in &item.labels {
            *result.label_counts.entry(label.clone()).or_default() += 1;
        }
    }

    result
}

/// Print validation result
pub fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ {} items are valid", result.item_count);
    } else {
        println!("✗ Validation failed");
    }

    if !result.label_counts.is_empty() {
        println!("\nLabels:");
        for (label, count) in &result.label_counts {
            println!("  {} ({})", label, count);
        }
        println!("\nEvery label must already exist in the target repository.");
    }

    if !result.errors.is_empty() {
        println!("\nErrors:");
        for error in &result.errors {
            println!("  - {}", error);
        }
    }

    if !result.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &result.warnings {
            println!("  - {}", warning);
        }
    }
}
