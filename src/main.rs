use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use issuebatch::commands::{print_validation_result, run_batch, validate_items, RunOptions};
use issuebatch::models::ConfigOverrides;
use issuebatch::IssueBatchError;

/// issuebatch - create GitHub issues in bulk from an items file
#[derive(Parser)]
#[command(name = "issuebatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create one issue per item in the items file
    Run {
        /// Path to the items file (JSON, Markdown, or a directory of Markdown files)
        #[arg(short, long, default_value = "issues_data.json")]
        file: PathBuf,

        /// Repository in format OWNER/REPO
        #[arg(long, env = "GITHUB_REPOSITORY")]
        repo: Option<String>,

        /// GitHub personal access token
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Print issues without creating them
        #[arg(long)]
        dry_run: bool,

        /// Do not ask for confirmation before creating issues
        #[arg(short, long)]
        yes: bool,

        /// Override the GitHub API base URL
        #[arg(long)]
        api_url: Option<String>,

        /// Override the pause between requests, in milliseconds
        #[arg(long)]
        pace_ms: Option<u64>,

        /// Write a JSON report to this path
        #[arg(long)]
        report_json: Option<PathBuf>,
    },

    /// Check the items file without contacting GitHub
    Validate {
        /// Path to the items file (JSON, Markdown, or a directory of Markdown files)
        #[arg(short, long, default_value = "issues_data.json")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let project_root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => exit_with(IssueBatchError::Io(e)),
    };

    match cli.command {
        Commands::Run {
            file,
            repo,
            token,
            dry_run,
            yes,
            api_url,
            pace_ms,
            report_json,
        } => {
            let options = RunOptions {
                file,
                dry_run,
                yes,
                report_json,
                overrides: ConfigOverrides {
                    api_url,
                    repository: repo,
                    token,
                    pace_millis: pace_ms,
                },
            };
            match run_batch(&project_root, options).await {
                Ok(report) if !report.overall_success() => std::process::exit(1),
                Ok(_) => {}
                Err(e) => exit_with(e),
            }
        }

        Commands::Validate { file } => {
            let result = validate_items(&project_root, &file);
            print_validation_result(&result);
            if !result.valid {
                std::process::exit(1);
            }
        }
    }
}

fn exit_with(err: IssueBatchError) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}
