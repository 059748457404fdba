use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use mdtopics::config::{self, validate_prefix, ToolConfig};
use mdtopics::path::{ambiguity, topic_for};
use mdtopics::transport::{
    publish_document, read_json_lines, Collector, JsonLinesPublisher, PublishSummary, Retention,
};
use mdtopics::{decode, encode_all, markdown, Document, Record};
use similar::{ChangeTag, TextDiff};
use std::env;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Overrides the configured topic prefix when `--prefix` is not given.
const PREFIX_ENV: &str = "MDTOPICS_PREFIX";

#[derive(Parser)]
#[command(name = "mdtopics")]
#[command(
    about = "Publish markdown sections as topic records and rebuild documents from them",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./mdtopics.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log every heading and record
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a markdown file and publish one message per paragraph
    Publish {
        /// Markdown file to publish
        file: PathBuf,

        /// Topic prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// Write messages to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Collect published messages and rebuild the document
    Reconstruct {
        /// Read messages from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write the document to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Topic prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// Keep every distinct record (all) or only the latest per path (last-value)
        #[arg(short, long)]
        retention: Option<Retention>,
    },

    /// List the records a markdown file encodes to and flag lossy headings
    Inspect {
        /// Markdown file to inspect
        file: PathBuf,

        /// Topic prefix
        #[arg(short, long)]
        prefix: Option<String>,
    },

    /// Check that a markdown file survives encode, decode and re-encode
    Roundtrip {
        /// Markdown file to check
        file: PathBuf,

        /// Show a line diff between the file and its reconstruction
        #[arg(short, long)]
        diff: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = env::current_dir().context("failed to read current directory")?;
    let config = config::resolve(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Publish {
            file,
            prefix,
            output,
        } => cmd_publish(&config, &file, prefix, output),

        Commands::Reconstruct {
            input,
            output,
            prefix,
            retention,
        } => cmd_reconstruct(&config, input, output, prefix, retention),

        Commands::Inspect { file, prefix } => cmd_inspect(&config, &file, prefix),

        Commands::Roundtrip { file, diff } => cmd_roundtrip(&file, diff),
    }
}

/// Logs go to stderr; stdout carries messages or documents.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Prefix priority: flag, then `MDTOPICS_PREFIX`, then config file.
fn resolve_prefix(flag: Option<String>, config: &ToolConfig) -> Result<String> {
    let prefix = match flag {
        Some(prefix) => prefix,
        None => env::var(PREFIX_ENV).unwrap_or_else(|_| config.topic.prefix.clone()),
    };
    validate_prefix(&prefix)?;
    Ok(prefix)
}

fn read_markdown(file: &Path) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}

/// Atomic file write: tempfile in the target directory, fsync, rename.
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create temp file in {}", parent.display()))?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn display_diff(file: &Path, original: &str, rebuilt: &str) {
    println!("{}", format!("--- {} (original)", file.display()).dimmed());
    println!("{}", format!("+++ {} (reconstructed)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, rebuilt);
    for change in diff.iter_all_changes() {
        let line = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        print!("{}", line);
    }
    println!();
}

fn cmd_publish(
    config: &ToolConfig,
    file: &Path,
    prefix: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let prefix = resolve_prefix(prefix, config)?;
    let document = markdown::parse(&read_markdown(file)?);

    let summary = match &output {
        Some(path) => publish_to_file(&document, &prefix, path)?,
        None => {
            let mut publisher = JsonLinesPublisher::new(BufWriter::new(io::stdout().lock()));
            publish_document(&document, &prefix, &mut publisher)?
        }
    };

    eprintln!(
        "{} Published {} records from {} under {}/",
        "✓".green(),
        summary.published,
        file.display(),
        prefix
    );
    Ok(())
}

/// Messages are buffered so a failed encode leaves `path` untouched.
fn publish_to_file(document: &Document, prefix: &str, path: &Path) -> Result<PublishSummary> {
    let mut publisher = JsonLinesPublisher::new(Vec::new());
    let summary = publish_document(document, prefix, &mut publisher)?;
    write_atomic(path, &publisher.into_inner())?;
    Ok(summary)
}

fn cmd_reconstruct(
    config: &ToolConfig,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    prefix: Option<String>,
    retention: Option<Retention>,
) -> Result<()> {
    let prefix = resolve_prefix(prefix, config)?;
    let retention = retention.unwrap_or(config.collect.retention);
    let mut collector = Collector::new(prefix, retention);

    let summary = match &input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            collector.collect(read_json_lines(BufReader::new(file)))?
        }
        None => collector.collect(read_json_lines(io::stdin().lock()))?,
    };

    if summary.rejected > 0 {
        eprintln!(
            "{}",
            format!("Warning: skipped {} messages without a usable path", summary.rejected)
                .yellow()
        );
    }

    let text = collector.finish();
    match &output {
        Some(path) => {
            write_atomic(path, text.as_bytes())?;
            eprintln!(
                "{} Reconstructed {} records into {}",
                "✓".green(),
                summary.accepted,
                path.display()
            );
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn cmd_inspect(config: &ToolConfig, file: &Path, prefix: Option<String>) -> Result<()> {
    let prefix = resolve_prefix(prefix, config)?;
    let document = markdown::parse(&read_markdown(file)?);
    let records = encode_all(&document)?;

    println!("{}", "Records".bold());
    for record in &records {
        println!(
            "  {} {}",
            topic_for(&prefix, record.path()).cyan(),
            record.content().dimmed()
        );
    }
    println!();

    let mut warnings = 0;
    let mut depth = 0u8;
    for (level, title) in document.headings() {
        if let Some(kind) = ambiguity(&title) {
            println!("{} heading '{}' {}", "⚠".yellow(), title, kind);
            warnings += 1;
        }
        if level > depth.saturating_add(1) {
            println!(
                "{} heading '{}' skips from level {} to {} and will be rebuilt at level {}",
                "⚠".yellow(),
                title,
                depth,
                level,
                depth + 1
            );
            warnings += 1;
            depth += 1;
        } else {
            depth = level;
        }
    }

    println!("{}", "Summary:".bold());
    println!("  {} records", format!("{}", records.len()).green());
    println!("  {} warnings", format!("{}", warnings).yellow());
    Ok(())
}

fn cmd_roundtrip(file: &Path, show_diff: bool) -> Result<()> {
    let text = read_markdown(file)?;

    let mut original = encode_all(&markdown::parse(&text))?;
    original.sort();
    let rebuilt = decode(original.clone());
    let mut again = encode_all(&markdown::parse(&rebuilt))?;
    again.sort();

    if show_diff {
        display_diff(file, &text, &rebuilt);
    }

    if original == again {
        println!(
            "{} Round trip preserved {} records",
            "✓".green(),
            original.len()
        );
        return Ok(());
    }

    eprintln!("{} Round trip changed the record set", "✗".red());
    for record in missing(&original, &again) {
        eprintln!("  {} {}", "-".red(), record);
    }
    for record in missing(&again, &original) {
        eprintln!("  {} {}", "+".green(), record);
    }
    std::process::exit(1);
}

/// Records of `left` not present in `right`; both sorted.
fn missing<'a>(left: &'a [Record], right: &[Record]) -> Vec<&'a Record> {
    left.iter()
        .filter(|record| right.binary_search(record).is_err())
        .collect()
}
