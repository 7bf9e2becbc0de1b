//! CLI tool for converting between slide-annotated markdown and
//! notebooks.

use anyhow::{Context, Result};
use clap::Parser;
use slidedown_core::DocumentFormat;
use slidedown_markdown::{MarkdownSerializer, SlideAnnotator};
use slidedown_notebook::{notebook_from_blocks, Notebook};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Convert slide-annotated markdown to notebooks and back.
#[derive(Parser, Debug)]
#[command(name = "slidedown")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input document(s) (.md or .ipynb)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path) {
            Ok((output, extension)) => {
                if args.print {
                    print!("{}", output);
                } else {
                    let output_path =
                        get_output_path(input_path, args.output.as_ref(), extension)?;
                    write_output(&output_path, &output)?;
                    if args.verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

/// Convert a single document, returning the converted text and the
/// extension it should be written under.
fn process_file(input_path: &Path) -> Result<(String, &'static str)> {
    let contents = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    // Content sniff first, extension as a fallback
    let format = DocumentFormat::from_content(&contents)
        .or_else(|| {
            input_path
                .extension()
                .and_then(|e| e.to_str())
                .and_then(DocumentFormat::from_extension)
        })
        .ok_or_else(|| anyhow::anyhow!("Could not detect document format"))?;

    match format {
        DocumentFormat::Markdown => {
            log::debug!("Converting markdown to notebook");
            let blocks = SlideAnnotator::new()
                .read(&contents)
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            let notebook = notebook_from_blocks(blocks);
            let json = notebook.to_json().map_err(|e| anyhow::anyhow!("{}", e))?;
            Ok((format!("{}\n", json), "ipynb"))
        }
        DocumentFormat::Notebook => {
            log::debug!("Converting notebook to markdown");
            let notebook = Notebook::from_json(&contents).map_err(|e| anyhow::anyhow!("{}", e))?;
            log::debug!("Notebook has {} cells", notebook.cells.len());
            let markdown = MarkdownSerializer::new().writes(&notebook.cells);
            let output = if markdown.ends_with('\n') {
                markdown
            } else {
                format!("{}\n", markdown)
            };
            Ok((output, "md"))
        }
    }
}

/// Determine the output path for a converted document.
fn get_output_path(
    input_path: &Path,
    output_dir: Option<&PathBuf>,
    extension: &str,
) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.{}", stem, extension);

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(output_filename)
            } else {
                PathBuf::from(output_filename)
            }
        }
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
