use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::commands::report::{render_preview, render_summary, write_json_report, ConsoleProgress};
use crate::core::{load_config, load_items, resolve_repository, GitHubClient, SubmissionEngine};
use crate::error::IssueBatchError;
use crate::models::{BatchReport, BatchRun, ConfigOverrides, RunMode};

/// Run options
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Items file or directory
    pub file: PathBuf,
    /// Preview without creating anything
    pub dry_run: bool,
    /// Skip the confirmation prompt
    pub yes: bool,
    /// Where to write the JSON report, if anywhere
    pub report_json: Option<PathBuf>,
    /// CLI values layered over issuebatch.toml
    pub overrides: ConfigOverrides,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            file: PathBuf::from("issues_data.json"),
            dry_run: false,
            yes: false,
            report_json: None,
            overrides: ConfigOverrides::default(),
        }
    }
}

/// Load the items file and submit it, or preview it on a dry run
pub async fn run_batch(
    project_root: &PathBuf,
    options: RunOptions,
) -> Result<BatchReport, IssueBatchError> {
    let config = load_config(project_root, options.overrides)?;
    let repository = resolve_repository(&config.github)?.to_string();

    let file = project_root.join(&options.file);
    let items = load_items(&file)?;
    println!("Loaded {} issues from {}", items.len(), options.file.display());

    let mode = RunMode::from_dry_run(options.dry_run);
    let batch = BatchRun::new(items, mode);
    let engine = SubmissionEngine::new(Duration::from_millis(config.behavior.pace_millis));

    let report = match mode {
        RunMode::DryRun => {
            let report = engine.preview(&batch)?;
            print!("{}", render_preview(&batch, config.behavior.preview_chars));
            report
        }
        RunMode::Execute => {
            // Build the client first so a missing token fails before the prompt
            let client = GitHubClient::new(&config.github)?;
            batch.validate()?;

            let ask = !options.yes && !batch.is_empty() && std::io::stdin().is_terminal();
            if ask && !confirm(batch.len(), &repository)? {
                return Err(IssueBatchError::Aborted);
            }

            println!("\nCreating issues in repository: {}", repository);
            println!("{}", "=".repeat(80));

            let report = engine
                .run_with_progress(&batch, &client, &mut ConsoleProgress)
                .await?;
            print!("{}", render_summary(&batch, &report));
            report
        }
    };

    if let Some(path) = options.report_json {
        let path = project_root.join(path);
        write_json_report(&path, &repository, &batch, &report)?;
        info!("Wrote JSON report to {}", path.display());
    }

    Ok(report)
}

fn confirm(count: usize, repository: &str) -> Result<bool, IssueBatchError> {
    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Create {} issues in {}?", count, repository))
        .default(false)
        .interact()?;
    Ok(answer)
}
