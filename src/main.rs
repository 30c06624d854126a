//! Pliant CLI - format and inspect XML through the dynamic tree model.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use pliant::{Node, WriteOptions};

/// Pliant - schema-less XML tree tool
#[derive(Parser)]
#[command(name = "pliant")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an XML file and write it back out
    Fmt {
        /// Input XML file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Spaces per nesting level
        #[arg(long, default_value_t = 2, env = "PLIANT_INDENT")]
        indent: usize,

        /// Write everything on one line
        #[arg(long)]
        compact: bool,

        /// Leave out the XML declaration
        #[arg(long)]
        no_declaration: bool,
    },

    /// Check that files survive a parse/serialize/parse round trip
    Check {
        /// Input files or glob patterns
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Print the element outline of a file
    Outline {
        /// Input XML file
        #[arg(short, long)]
        input: PathBuf,

        /// Maximum depth to print
        #[arg(short, long)]
        depth: Option<usize>,
    },

    /// Count the children of the root element
    Count {
        /// Input XML file
        #[arg(short, long)]
        input: PathBuf,

        /// Only count children with this name
        #[arg(short, long)]
        name: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Fmt {
            input,
            output,
            indent,
            compact,
            no_declaration,
        } => {
            let options = WriteOptions::default()
                .with_indent((!compact).then_some(indent))
                .with_declaration(!no_declaration);
            cmd_fmt(&input, output.as_deref(), options)?;
        }
        Commands::Check { inputs } => {
            cmd_check(&inputs)?;
        }
        Commands::Outline { input, depth } => {
            cmd_outline(&input, depth)?;
        }
        Commands::Count { input, name } => {
            cmd_count(&input, name.as_deref())?;
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<Node> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Node::from_xml_bytes(&data).with_context(|| format!("Failed to parse {}", path.display()))
}

fn cmd_fmt(input: &Path, output: Option<&Path>, options: WriteOptions) -> Result<()> {
    let start = Instant::now();
    let root = load(input)?;
    debug!("Parsed {} elements in {:?}", root.element_count(), start.elapsed());

    let mut xml = root
        .to_xml_string_with(options)
        .context("Failed to serialize XML")?;
    xml.push('\n');

    match output {
        Some(path) => {
            fs::write(path, xml).context("Failed to write output file")?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", xml),
    }

    Ok(())
}

/// Expand glob patterns; arguments that match nothing are kept as plain paths.
fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in inputs {
        let before = paths.len();
        for entry in glob::glob(pattern).with_context(|| format!("Invalid pattern {pattern}"))? {
            paths.push(entry?);
        }
        if paths.len() == before {
            paths.push(PathBuf::from(pattern));
        }
    }
    Ok(paths)
}

fn check_file(path: &Path) -> Result<()> {
    let first = load(path)?;
    let text = first.to_text("xml").context("Failed to serialize XML")?;
    let second = Node::from_text(&text).context("Failed to re-parse serialized XML")?;

    if first != second {
        anyhow::bail!("tree changed after round trip");
    }
    Ok(())
}

fn cmd_check(inputs: &[String]) -> Result<()> {
    let paths = expand_inputs(inputs)?;
    info!("Checking {} files...", paths.len());

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let failures: Vec<(PathBuf, anyhow::Error)> = paths
        .par_iter()
        .filter_map(|path| {
            let result = check_file(path);
            pb.inc(1);
            result.err().map(|e| (path.clone(), e))
        })
        .collect();
    pb.finish_and_clear();

    for (path, e) in &failures {
        warn!("{}: {:#}", path.display(), e);
    }
    info!(
        "{} of {} files round-tripped in {:?}",
        paths.len() - failures.len(),
        paths.len(),
        start.elapsed()
    );

    if !failures.is_empty() {
        anyhow::bail!("{} files failed the round trip", failures.len());
    }
    Ok(())
}

fn cmd_outline(input: &Path, max_depth: Option<usize>) -> Result<()> {
    let root = load(input)?;
    print_outline(&root, 0, max_depth);
    Ok(())
}

fn print_outline(node: &Node, depth: usize, max_depth: Option<usize>) {
    let namespace = node
        .namespace()
        .map(|ns| format!(" {{{ns}}}"))
        .unwrap_or_default();
    println!(
        "{:indent$}{}{} attrs={} children={}",
        "",
        node.name(),
        namespace,
        node.attributes().len(),
        node.child_count(),
        indent = depth * 2
    );

    if max_depth.is_some_and(|max| depth >= max) {
        return;
    }
    for child in node.children() {
        print_outline(child, depth + 1, max_depth);
    }
}

fn cmd_count(input: &Path, name: Option<&str>) -> Result<()> {
    let root = load(input)?;
    let children = root.index(name)?;
    println!("{}", children.len());
    Ok(())
}
