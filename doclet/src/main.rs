//! doclet: render cross-linked HTML documentation from a program model.
//!
//! The model (packages, classes, members, annotations and doc comment tag
//! sequences) comes as JSON from an external front end:
//!
//! `doclet -d build/docs --link https://docs.oracle.com/javase/8/docs/api model/*.json`

mod anchor;
mod annotation;
mod comment;
mod config;
mod context;
mod diagnostics;
mod doc_path;
mod error;
mod externs;
mod html;
mod link;
mod model;
mod render;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "doclet",
    about = "Generate HTML documentation from a serialized program model"
)]
struct Cli {
    /// Model files (glob patterns and directories supported)
    #[arg(required = true)]
    models: Vec<String>,

    /// Output directory
    #[arg(short = 'd', long)]
    output: PathBuf,

    /// Document only these packages. Can be specified multiple times.
    #[arg(short = 'p', long = "package")]
    packages: Vec<String>,

    /// Link to external documentation at this URL (reads its package-list)
    #[arg(long)]
    link: Vec<String>,

    /// Link to external documentation at URL, reading the package-list from DIR
    #[arg(long, num_args = 2, value_names = ["URL", "DIR"])]
    link_offline: Vec<String>,

    /// Tab expansion width in comment text
    #[arg(long, default_value_t = 8)]
    tab_width: usize,

    /// Suppress description text
    #[arg(long)]
    no_comment: bool,

    /// Do not generate pages for deprecated classes
    #[arg(long)]
    no_deprecated: bool,

    /// Colon-separated packages whose qualifier is dropped from labels, or "all"
    #[arg(long)]
    no_qualifier: Option<String>,

    /// Text emitted for {@docRoot}
    #[arg(long)]
    docroot: Option<String>,

    /// Absolute URL that replaces {@docRoot}/..
    #[arg(long)]
    docroot_parent: Option<String>,
}

impl Cli {
    fn config(&self) -> config::Config {
        config::Config {
            output_dir: self.output.clone(),
            packages: self.packages.clone(),
            links: self.link.clone(),
            links_offline: self
                .link_offline
                .chunks(2)
                .filter(|pair| pair.len() == 2)
                .map(|pair| (pair[0].clone(), pair[1].clone()))
                .collect(),
            tab_width: self.tab_width,
            no_comment: self.no_comment,
            no_deprecated: self.no_deprecated,
            no_qualifier: self
                .no_qualifier
                .as_deref()
                .map(|list| {
                    list.split(':')
                        .filter(|p| !p.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            docroot: self.docroot.clone(),
            docroot_parent: self.docroot_parent.clone(),
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .try_init();
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.config();
    config.validate()?;

    let files = expand_globs(&cli.models)?;
    if files.is_empty() {
        anyhow::bail!("no model files found");
    }
    let models = files
        .iter()
        .map(|path| model::Model::load(path))
        .collect::<Result<Vec<_>, _>>()?;
    let model = model::Model::merge(models);

    let reporter = diagnostics::Reporter::default();
    model.check(&reporter);
    for package in &config.packages {
        if model.package(package).is_none() {
            reporter.error(None, format!("No model data for package {}", package));
        }
    }

    let externs = externs::ExternalDocs::load(&config)?;
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    let docs = context::DocumentedSet::new(&model, &config, &externs);
    render::generate(&docs, &reporter)?;

    let errors = reporter.errors();
    let warnings = reporter.warnings();
    if errors > 0 {
        eprintln!("{} error{}", errors, plural(errors));
    }
    if warnings > 0 {
        eprintln!("{} warning{}", warnings, plural(warnings));
    }
    Ok(if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Expand glob patterns into model file paths. Directories are scanned
/// (non-recursively) for `*.json`.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && p.extension().is_some_and(|e| e == "json") {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}
