//! mediagrid: upload media to a gallery server and browse what it holds.
//!
//! Backend endpoints come from `--profile` and the `MEDIAGRID_*` variables;
//! every endpoint flag overrides both.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mediagrid_api_client::ApiClient;
use mediagrid_cli::{init_tracing, print_elements, BackendArgs, TerminalNotifier};
use mediagrid_core::{GalleryElement, SelectedFile, Surface};
use mediagrid_services::{
    html, GalleryLoader, MemorySurface, PreviewRenderer, SubmissionOutcome, SubmitEvent,
    UploadForm, UploadSubmitter,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "mediagrid", about = "Media upload and gallery client")]
struct Cli {
    #[command(flatten)]
    backend: BackendArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the remote listing and show the displayable media
    List {
        /// Print the gallery state as JSON
        #[arg(long)]
        json: bool,
        /// Also write the gallery as an HTML page
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Reload the gallery periodically and print it whenever it changes
    Watch {
        /// Seconds between reloads
        #[arg(long, default_value = "5")]
        interval: u64,
        /// Rewrite this HTML page after every change
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Preview and upload files, then refresh the gallery
    Upload {
        /// Files to upload
        files: Vec<PathBuf>,
        /// Print submission outcomes as JSON
        #[arg(long)]
        json: bool,
        /// Write the final surface as an HTML page
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Render local previews without contacting the server
    Preview {
        /// Files to preview
        files: Vec<PathBuf>,
        /// Write the previews as an HTML page
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Print the URL a stored file is served from
    Url {
        /// Stored file name
        name: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn write_page(path: &Path, title: &str, elements: &[GalleryElement]) -> anyhow::Result<()> {
    std::fs::write(path, html::render_page(title, elements))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "Wrote gallery page");
    Ok(())
}

fn select(files: &[PathBuf]) -> Vec<SelectedFile> {
    files.iter().map(SelectedFile::from_path).collect()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = cli
        .backend
        .into_config()
        .context("Invalid backend configuration. Check --profile and MEDIAGRID_* settings")?;

    let client = Arc::new(ApiClient::new(config.clone()).context("Failed to create API client")?);
    let surface = Arc::new(MemorySurface::new());
    let notifier = Arc::new(TerminalNotifier);
    let gallery = GalleryLoader::new(config.clone(), client.clone(), surface.clone());
    let previews = PreviewRenderer::new(surface.clone(), notifier.clone());

    match cli.command {
        Commands::List { json, html } => {
            let state = gallery.load().await;
            if json {
                print_json(&state)?;
            } else {
                print_elements(&surface.elements());
            }
            if let Some(path) = html {
                write_page(&path, "Gallery", &surface.elements())?;
            }
        }
        Commands::Watch { interval, html } => {
            let period = Duration::from_secs(interval.max(1));
            let mut ticker = tokio::time::interval(period);
            let mut shown: Option<Vec<GalleryElement>> = None;

            tracing::info!(url = %config.list_url(), interval = period.as_secs(), "Watching gallery");
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        gallery.load().await;
                        let elements = surface.elements();
                        if shown.as_ref() != Some(&elements) {
                            print_elements(&elements);
                            println!();
                            if let Some(path) = &html {
                                write_page(path, "Gallery", &elements)?;
                            }
                            shown = Some(elements);
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Stopping watch");
                        break;
                    }
                }
            }
        }
        Commands::Upload { files, json, html } => {
            let submitter = UploadSubmitter::new(
                client.clone(),
                surface.clone(),
                notifier.clone(),
                previews,
                gallery,
            );
            let mut form = UploadForm::new();
            form.on_submit(Arc::new(submitter));

            let submissions = form.submit(SubmitEvent::new(select(&files))).await;

            let mut outcomes = Vec::with_capacity(submissions.len());
            for submission in submissions {
                submission.previews.wait().await;
                outcomes.push(submission.outcome);
            }

            if json {
                print_json(&outcomes)?;
            } else {
                print_elements(&surface.elements());
            }
            if let Some(path) = html {
                write_page(&path, "Gallery", &surface.elements())?;
            }

            let completed = outcomes
                .iter()
                .all(|o| matches!(o, SubmissionOutcome::Completed { .. }));
            if !completed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Preview { files, html } => {
            previews.render(&select(&files)).wait().await;
            print_elements(&surface.elements());
            if let Some(path) = html {
                write_page(&path, "Preview", &surface.elements())?;
            }
        }
        Commands::Url { name } => {
            println!("{}", config.serve_url(&name));
        }
    }

    Ok(ExitCode::SUCCESS)
}
