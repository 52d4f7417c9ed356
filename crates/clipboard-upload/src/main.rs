//! clipboard-upload: moves pasted base64 images out of rich-text HTML.
//!
//! `clipboard-upload page.html -o page.out.html --store images/`
//!
//! Every `<img src="data:image/...;base64,...">` in the input is written to
//! the store directory and its `src` replaced with `resolveuid/<file>` (or
//! the configured reference prefix).

mod fs_store;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use clipboard_core::document::RichTextDocument;
use clipboard_core::options::UploadOptions;

use crate::fs_store::FsImageStore;

#[derive(Parser)]
#[command(
    name = "clipboard-upload",
    version,
    about = "Extract inline base64 images from rich-text HTML"
)]
struct Cli {
    /// Input HTML file
    input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory receiving the extracted images (default: <input dir>/images)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Prefix of the rewritten src attribute (default: resolveuid/)
    #[arg(long)]
    reference_prefix: Option<String>,

    /// Prefix of generated image names (default: Clipboard_image_)
    #[arg(long)]
    id_prefix: Option<String>,

    /// strftime pattern appended to the image name prefix
    #[arg(long)]
    timestamp_format: Option<String>,

    /// Rewrite the document even when it has no inline image
    #[arg(long)]
    always_reserialize: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Dump effective merged config as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

/// Load config from global and project-local TOML files.
/// The project-local file fully overrides the global one. Missing files are
/// silently ignored.
fn load_config() -> UploadOptions {
    let mut opts = UploadOptions::default();

    // 1. Global config: ~/.config/clipboard-upload/config.toml
    if let Some(config_dir) = dirs::config_dir() {
        let global_path = config_dir.join("clipboard-upload").join("config.toml");
        if let Some(parsed) = read_config(&global_path) {
            opts = parsed;
        }
    }

    // 2. Project-local config: ./.clipboard-upload.toml
    if let Some(parsed) = read_config(Path::new(".clipboard-upload.toml")) {
        opts = parsed;
    }

    opts
}

fn read_config(path: &Path) -> Option<UploadOptions> {
    let contents = fs::read_to_string(path).ok()?;
    match toml::from_str::<UploadOptions>(&contents) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

/// Apply CLI flags on top of config-loaded options.
/// Only overrides when the CLI flag was explicitly provided.
fn apply_cli_overrides(opts: &mut UploadOptions, cli: &Cli) {
    if cli.verbose > 0 {
        opts.verbose = cli.verbose;
    }
    if cli.store.is_some() {
        opts.store_dir = cli.store.clone();
    }
    if let Some(ref prefix) = cli.reference_prefix {
        opts.reference_prefix = prefix.clone();
    }
    if let Some(ref prefix) = cli.id_prefix {
        opts.id_prefix = prefix.clone();
    }
    if let Some(ref format) = cli.timestamp_format {
        opts.timestamp_format = format.clone();
    }
    if cli.always_reserialize {
        opts.always_reserialize = true;
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let mut options = load_config();
    apply_cli_overrides(&mut options, &cli);

    // Handle --dump-config
    if cli.dump_config {
        match toml::to_string_pretty(&options) {
            Ok(s) => {
                println!("{}", s);
                process::exit(0);
            }
            Err(e) => {
                eprintln!("Error serializing config: {}", e);
                process::exit(1);
            }
        }
    }

    let Some(input) = cli.input.clone() else {
        eprintln!("Usage: clipboard-upload <input.html> [-o output.html] [--store DIR] [options]");
        process::exit(1);
    };

    if let Err(e) = run(&input, cli.output.as_deref(), &options) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(input: &Path, output: Option<&Path>, options: &UploadOptions) -> Result<()> {
    options.validate().context("Invalid configuration")?;

    let html = fs::read_to_string(input)
        .with_context(|| format!("Cannot read {}", input.display()))?;

    let store_dir = options.store_dir.clone().unwrap_or_else(|| {
        input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("images")
    });
    let mut store = FsImageStore::new(&store_dir)
        .with_context(|| format!("Cannot create image store {}", store_dir.display()))?;

    let doc_id = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let mut document = RichTextDocument::new(doc_id, html);

    log::info!("Processing {} → {}", input.display(), store_dir.display());
    clipboard_transforms::standard_pipeline()
        .on_save(&mut document, &mut store, options)
        .with_context(|| format!("Failed to process {}", input.display()))?;

    let text = document.into_text().unwrap_or_default();
    match output {
        Some(path) => fs::write(path, &text)
            .with_context(|| format!("Cannot write {}", path.display()))?,
        None => print!("{}", text),
    }

    if store.created().is_empty() {
        log::info!("No inline images found");
    } else {
        log::info!(
            "Extracted {} inline images into {}",
            store.created().len(),
            store.dir().display()
        );
    }
    Ok(())
}
