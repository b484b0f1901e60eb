use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tv_sanitize::{sanitize, SanitizeOptions};
use tv_transform::{flatten_document, format_value, normalize, transform};
use tv_tree::{load_document, FlatTokenMap, TokenGroup};

mod config;
mod sources;

use config::{apply_sanitize_flags, BuildConfig, BuildOverrides};
use sources::load_sources;

#[derive(Parser)]
#[command(name = "tv", about = "tokenvars: design tokens to CSS custom properties")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten token files and write CSS custom properties.
    Build {
        /// Token JSON files or glob patterns (overrides the config's sources).
        inputs: Vec<PathBuf>,
        /// Output file (overrides the config's build path and destination).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the CSS instead of writing a file.
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
        /// JSON build configuration.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Selector wrapping the declarations.
        #[arg(long)]
        selector: Option<String>,
        /// Clean up legacy type tags before flattening.
        #[arg(long)]
        sanitize: bool,
        /// Merge every top-level token set instead of unwrapping `global`.
        #[arg(long)]
        merge_sets: bool,
    },
    /// Load token files and report whether they parse.
    Check {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Print the flattened `name -> value` table.
    Flatten {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Emit a JSON object instead of plain lines.
        #[arg(long)]
        json: bool,
        #[arg(long)]
        sanitize: bool,
        #[arg(long)]
        merge_sets: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match cli.command {
        Commands::Build {
            inputs,
            output,
            stdout,
            config,
            selector,
            sanitize,
            merge_sets,
        } => {
            let mut config = match &config {
                Some(path) => BuildConfig::load(path)?,
                None => BuildConfig::default(),
            };
            config.apply(BuildOverrides {
                inputs,
                selector,
                sanitize,
                merge_sets,
            });

            let document = load_tree(&config.sources, config.sanitize.as_ref())?;
            let css = transform(document, &config.emit_options());

            if stdout {
                print!("{css}");
            } else {
                let path = output.unwrap_or_else(|| config.output_path());
                write_output(&path, &css)?;
                tracing::info!(path = %path.display(), "design tokens written");
            }
        }
        Commands::Check { inputs } => {
            for path in sources::expand_sources(&inputs)? {
                let root = TokenGroup::root(load_document(&path)?);
                eprintln!("OK: {} ({} tokens)", path.display(), root.token_count());
            }
        }
        Commands::Flatten {
            inputs,
            json,
            sanitize,
            merge_sets,
        } => {
            let mut options = None;
            apply_sanitize_flags(&mut options, sanitize, merge_sets);
            let document = load_tree(&inputs, options.as_ref())?;
            let flat = flatten_document(document);
            print!("{}", render_table(&flat, json)?);
        }
    }

    Ok(())
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match cli.verbose {
        0 if cli.quiet => EnvFilter::new("error"),
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(cli.verbose >= 2),
        )
        .init();
}

/// Merge and optionally sanitize the token sources into one document.
fn load_tree(sources: &[PathBuf], options: Option<&SanitizeOptions>) -> Result<Value> {
    let document = load_sources(sources)?;
    Ok(match options {
        Some(options) => sanitize(&document, options),
        None => document,
    })
}

/// `name = value` lines, or a pretty JSON object with `json`.
fn render_table(flat: &FlatTokenMap, json: bool) -> Result<String> {
    if json {
        let table: serde_json::Map<String, Value> = flat
            .iter()
            .map(|(path, value)| (normalize(path), Value::String(format_value(value))))
            .collect();
        return Ok(format!("{}\n", serde_json::to_string_pretty(&table)?));
    }
    Ok(flat
        .iter()
        .map(|(path, value)| format!("{} = {}\n", normalize(path), format_value(value)))
        .collect())
}

fn write_output(path: &Path, css: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, css).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(document: Value, json: bool) -> String {
        render_table(&flatten_document(document), json).unwrap()
    }

    #[test]
    fn table_lines_use_declaration_names() {
        let document = json!({
            "color": {
                "primaryDark": { "$value": "#001" },
                "link": { "$value": "{color.primaryDark}" }
            }
        });
        assert_eq!(
            table(document, false),
            "color-primary-dark = #001\ncolor-link = var(--color-primary-dark)\n"
        );
    }

    #[test]
    fn table_as_json_keeps_order() {
        let document = json!({ "b": { "$value": 2 }, "a": { "$value": [1, "x"] } });
        assert_eq!(table(document, true), "{\n  \"b\": \"2\",\n  \"a\": \"1,x\"\n}\n");
    }

    #[test]
    fn empty_document_renders_nothing() {
        assert_eq!(table(json!({}), false), "");
        assert_eq!(table(json!({}), true), "{}\n");
    }

    #[test]
    fn merge_sets_flag_folds_sibling_sets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let document = json!({
            "global": { "space": { "sm": { "$value": "4px" } } },
            "dark": { "color": { "bg": { "$value": "#000" } } }
        });
        std::fs::write(&path, document.to_string()).unwrap();

        let plain = load_tree(std::slice::from_ref(&path), None).unwrap();
        assert_eq!(table(plain, false), "space-sm = 4px\n");

        let mut options = None;
        apply_sanitize_flags(&mut options, false, true);
        let merged = load_tree(&[path], options.as_ref()).unwrap();
        assert_eq!(table(merged, false), "space-sm = 4px\ncolor-bg = #000\n");
    }
}
