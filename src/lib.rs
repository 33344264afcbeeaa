//! issuebatch - create GitHub issues in bulk from a declarative items file
//!
//! Items (title, Markdown body, labels) are read from a JSON file or from
//! Markdown files with YAML frontmatter, then submitted one at a time. A
//! failing item never stops the rest of the batch; the run ends with a report
//! of what was created and what failed.
//!
//! # Architecture
//!
//! - **commands**: CLI command implementations (run, validate) and report rendering
//! - **core**: Submission engine, GitHub client, items loader, config loading
//! - **models**: Data structures (config, work items, batch, outcomes, report)
//! - **error**: Error types

pub mod commands;
pub mod core;
pub mod error;
pub mod models;

pub use error::{IssueBatchError, Result};
