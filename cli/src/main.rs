//! Command-line driver for a running template server.
//!
//! Uses the same dashboard, editor shell, and property panels as any other
//! host, backed by the server's REST surface through `HttpTemplateStore`.


use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use editor::decode::DroppedFile;
use editor::net::HttpTemplateStore;
use editor::panels::{Panels, ShapesPanel};
use editor::shell::Placement;
use editor::{Dashboard, EditorError, EditorShell};
use scene::doc::ObjectId;
use scene::store::TemplateId;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("image drop discarded: the session changed while decoding")]
    Discarded,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "pinplate-cli", about = "Pinterest template server CLI")]
struct Cli {
    #[arg(long, env = "PINPLATE_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "PINPLATE_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// List templates, newest first.
    List,
    /// Print one template as JSON.
    Show { id: TemplateId },
    /// Build a new template and save it.
    Create {
        #[arg(long, default_value = scene::consts::NEW_TEMPLATE_TITLE)]
        title: String,
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Open an existing template, add to it, and save it back.
    Edit {
        id: TemplateId,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Delete a template.
    Delete { id: TemplateId },
}

/// Edits applied to the scene, in this order: background, text, shapes, images.
#[derive(Args, Debug, Default)]
struct SceneArgs {
    /// Flat background color.
    #[arg(long)]
    background: Option<String>,

    /// Image file to cover the canvas with.
    #[arg(long)]
    background_image: Option<PathBuf>,

    /// Add a text object (repeatable).
    #[arg(long = "text")]
    texts: Vec<String>,

    /// Font family for added text.
    #[arg(long)]
    font: Option<String>,

    /// Font size for added text.
    #[arg(long)]
    font_size: Option<u32>,

    /// Fill or stroke color for added text and shapes.
    #[arg(long)]
    color: Option<String>,

    #[arg(long = "rect", default_value_t = 0)]
    rects: usize,

    #[arg(long = "circle", default_value_t = 0)]
    circles: usize,

    #[arg(long = "line", default_value_t = 0)]
    lines: usize,

    /// Image file to place on the canvas (repeatable).
    #[arg(long = "image")]
    images: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = Arc::new(HttpTemplateStore::new(cli.base_url, cli.token));
    let dashboard = Dashboard::new(store.clone());

    match cli.command {
        Command::Ping => run_ping(&store).await,
        Command::List => {
            let templates = dashboard.list_templates().await?;
            print_json(&serde_json::to_value(templates)?)
        }
        Command::Show { id } => {
            let shell = dashboard.select_open(id).await?;
            print_json(&serde_json::to_value(shell.template())?)
        }
        Command::Create { title, scene } => {
            let mut shell = dashboard.select_create_new();
            shell.set_title(&title)?;
            run_edit(shell, &scene).await
        }
        Command::Edit { id, title, scene } => {
            let mut shell = dashboard.select_open(id).await?;
            if let Some(title) = title {
                shell.set_title(&title)?;
            }
            run_edit(shell, &scene).await
        }
        Command::Delete { id } => {
            dashboard.delete_template(id).await?;
            println!("deleted {id}");
            Ok(())
        }
    }
}

fn healthz_url(store: &HttpTemplateStore) -> String {
    format!("{}/healthz", store.base_url().trim_end_matches('/'))
}

async fn run_ping(store: &HttpTemplateStore) -> Result<(), CliError> {
    let response = reqwest::get(healthz_url(store)).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn run_edit(mut shell: EditorShell, args: &SceneArgs) -> Result<(), CliError> {
    apply_scene_args(&mut shell, args).await?;
    let saved = shell.save().await?;
    shell.close();
    if let Some(id) = saved.id {
        println!("{id}");
    }
    Ok(())
}

type AddShape = fn(&mut ShapesPanel, &mut EditorShell) -> Result<ObjectId, EditorError>;

async fn read_file(path: &Path) -> Result<DroppedFile, CliError> {
    DroppedFile::read(path)
        .await
        .map_err(|source| CliError::ReadFile { path: path.display().to_string(), source })
}

async fn apply_scene_args(shell: &mut EditorShell, args: &SceneArgs) -> Result<(), CliError> {
    let mut panels = Panels::new();

    if let Some(color) = &args.background {
        panels.background.set_color(shell, color)?;
    }
    if let Some(path) = &args.background_image {
        let pending = panels.background.drop_file(shell, vec![read_file(path).await?])?;
        place(shell, pending.decode().await)?;
    }

    for content in &args.texts {
        panels.text.add_text(shell)?;
        panels.text.set_content(shell, content)?;
        if let Some(font) = &args.font {
            panels.text.set_font_family(shell, font)?;
        }
        if let Some(size) = args.font_size {
            panels.text.set_font_size(shell, size)?;
        }
        if let Some(color) = &args.color {
            panels.text.set_fill(shell, color)?;
        }
    }

    let shapes: [(usize, AddShape); 3] = [
        (args.rects, ShapesPanel::add_rectangle),
        (args.circles, ShapesPanel::add_circle),
        (args.lines, ShapesPanel::add_line),
    ];
    for (count, add) in shapes {
        for _ in 0..count {
            add(&mut panels.shapes, shell)?;
            if let Some(color) = &args.color {
                panels.shapes.set_color(shell, color)?;
            }
        }
    }

    if !args.images.is_empty() {
        let mut files = Vec::with_capacity(args.images.len());
        for path in &args.images {
            files.push(read_file(path).await?);
        }
        let pending = panels.image.drop_files(shell, files)?;
        place(shell, pending.decode().await)?;
    }

    Ok(())
}

fn place(shell: &mut EditorShell, batch: editor::decode::DecodedBatch) -> Result<(), CliError> {
    for failure in &batch.failures {
        eprintln!("skipped: {failure}");
    }
    match shell.apply_placement(batch)? {
        Placement::Placed { ids, skipped } => {
            eprintln!("placed {} image(s), skipped {skipped}", ids.len());
            Ok(())
        }
        Placement::Discarded => Err(CliError::Discarded),
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
