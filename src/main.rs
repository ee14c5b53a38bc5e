//! # aex
//!
//! Command-line front end for the AEX codec.
//!
//! Every command works on a scene snapshot: the whole project serialized as
//! JSON. Write commands save the mutated snapshot back (to `--output`, or in
//! place when no output is given).
//!
//! ## Commands
//! - `get`: Encode a scene object as a document
//! - `create`: Create a document's object under a parent
//! - `update`: Apply a document to an existing object
//! - `prescan`: Count the nodes a `get` would visit
//! - `schema`: Print the JSON Schema of the document model

use aex_core::{GetOptions, Project, SceneRef, UpdateOptions};
use aex_data::model::AexNode;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "aex")]
#[command(about = "Read and write compositing scenes as canonical JSON documents")]
#[command(version)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode the object at a target as a document
    Get {
        /// Scene snapshot to read
        snapshot: PathBuf,

        /// `project`, `comp:<id>`, `item:<id>`, `layer:<comp>:<index>` or
        /// `property:<comp>:<layer>:<matchName>/...`
        #[arg(short, long, default_value = "project")]
        target: SceneRef,

        /// JSON file with read options
        #[arg(long)]
        options: Option<PathBuf>,

        /// Output file for the result (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create a document's object under a parent
    Create {
        /// Scene snapshot to modify
        snapshot: PathBuf,

        /// Document to create
        document: PathBuf,

        #[arg(short, long, default_value = "project")]
        parent: SceneRef,

        /// JSON file with write options
        #[arg(long)]
        options: Option<PathBuf>,

        /// Where to save the modified snapshot (defaults to in place)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply a document to the object at a target
    Update {
        /// Scene snapshot to modify
        snapshot: PathBuf,

        /// Document to apply
        document: PathBuf,

        #[arg(short, long, default_value = "project")]
        target: SceneRef,

        /// JSON file with write options
        #[arg(long)]
        options: Option<PathBuf>,

        /// Where to save the modified snapshot (defaults to in place)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Count the nodes under a target
    Prescan {
        snapshot: PathBuf,

        #[arg(short, long, default_value = "project")]
        target: SceneRef,
    },

    /// Print the JSON Schema for documents
    Schema {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json);

    match cli.command {
        Commands::Get {
            snapshot,
            target,
            options,
            output,
        } => cmd_get(&snapshot, &target, options.as_deref(), output.as_deref()),
        Commands::Create {
            snapshot,
            document,
            parent,
            options,
            output,
        } => cmd_write(
            WriteKind::Create,
            &snapshot,
            &document,
            &parent,
            options.as_deref(),
            output.as_deref(),
        ),
        Commands::Update {
            snapshot,
            document,
            target,
            options,
            output,
        } => cmd_write(
            WriteKind::Update,
            &snapshot,
            &document,
            &target,
            options.as_deref(),
            output.as_deref(),
        ),
        Commands::Prescan { snapshot, target } => cmd_prescan(&snapshot, &target),
        Commands::Schema { output } => cmd_schema(output.as_deref()),
    }
}

#[derive(Clone, Copy)]
enum WriteKind {
    Create,
    Update,
}

fn load_project(path: &Path) -> Result<Project> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid snapshot {}", path.display()))
}

fn save_project(project: &Project, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(project).context("Failed to serialize snapshot")?;
    fs::write(path, text).with_context(|| format!("Failed to write snapshot {}", path.display()))
}

fn load_json(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn load_options<T: serde::de::DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        Some(path) => {
            let value = load_json(path)?;
            serde_json::from_value(value)
                .with_context(|| format!("Invalid options in {}", path.display()))
        }
        None => Ok(T::default()),
    }
}

/// Writes pretty JSON to `output`, or stdout.
fn emit(value: &impl serde::Serialize, output: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn cmd_get(snapshot: &Path, target: &SceneRef, options: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let project = load_project(snapshot)?;
    let options: GetOptions = load_options(options)?;
    let result = aex_core::get(&project, target, options)
        .with_context(|| format!("Failed to read {target}"))?;
    emit(&result, output)
}

fn cmd_write(
    kind: WriteKind,
    snapshot: &Path,
    document: &Path,
    target: &SceneRef,
    options: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let mut project = load_project(snapshot)?;
    let options: UpdateOptions = load_options(options)?;
    let document = load_json(document)?;

    let result = match kind {
        WriteKind::Create => aex_core::create(&mut project, target, document, options)
            .with_context(|| format!("Failed to create under {target}"))?,
        WriteKind::Update => aex_core::update(&mut project, target, document, options)
            .with_context(|| format!("Failed to update {target}"))?,
    };

    save_project(&project, output.unwrap_or(snapshot))?;
    tracing::info!(
        comps = result.stats.comp_count,
        layers = result.stats.layer_count,
        properties = result.stats.property_count,
        keys = result.stats.key_count,
        "write complete"
    );
    emit(&result, None)
}

fn cmd_prescan(snapshot: &Path, target: &SceneRef) -> Result<()> {
    let project = load_project(snapshot)?;
    let count = aex_core::prescan(&project, target)
        .with_context(|| format!("Failed to scan {target}"))?;
    println!("{count}");
    Ok(())
}

fn cmd_schema(output: Option<&Path>) -> Result<()> {
    let schema = schemars::schema_for!(AexNode);
    emit(&schema, output)
}
