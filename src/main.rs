use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use verselink::config::{load_config, save_config, VerseLinkConfig};
use verselink::context::{build_verse_view, format_verse_as_json, format_verse_as_markdown};
use verselink::export::{output_path, save_verses_json, to_raw_records, IdScheme};
use verselink::graph::{graph_stats, verify_correspondence};
use verselink::hydration::hydrate_segments;
use verselink::loader::load_verse_files;
use verselink::sources::read_segments_json;
use verselink::types::*;
use verselink::verse_graph::VerseGraph;

/// Cross-references two language editions of a verse text.
#[derive(Parser)]
#[command(name = "verselink", about = "Cross-references two language editions of a verse text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration
    Init {
        /// Project path (default: current directory)
        path: Option<String>,
    },
    /// Load and link both editions, then print statistics
    Link {
        /// Project path
        #[arg(short, long)]
        path: Option<String>,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Show a verse and its counterparts
    Show {
        /// Verse id
        id: String,
        /// Project path
        #[arg(short, long)]
        path: Option<String>,
        /// Edition to look in (a or b); both are searched when omitted
        #[arg(short, long)]
        side: Option<String>,
        /// Output format (markdown or json)
        #[arg(short, long, default_value = "markdown")]
        format: String,
    },
    /// Check that linked verses share a book and overlapping lines
    Check {
        /// Project path
        #[arg(short, long)]
        path: Option<String>,
    },
    /// Link two segment files by line overlap and write both record files
    ///
    /// Segment files are JSON arrays of `{book, line_numbers, paragraphs}`
    /// objects, as produced by an external text segmenter or by
    /// `verselink::hydration::segment_tokens`.
    Build {
        /// Segment file of the first edition
        a_segments: String,
        /// Segment file of the second edition
        b_segments: String,
        /// Project path
        #[arg(short, long)]
        path: Option<String>,
        /// Output directory (default: project path)
        #[arg(short, long)]
        out_dir: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Runs a command; `Ok(false)` means it completed but found problems.
async fn run(cli: Cli) -> verselink::errors::Result<bool> {
    match cli.command {
        Commands::Init { path } => {
            let project_path = resolve_path(path);
            save_config(&project_path, &VerseLinkConfig::default())?;
            println!("Initialized verselink at {}", project_path.display());
        }
        Commands::Link { path, json } => {
            let project_path = resolve_path(path);
            let config = load_config(&project_path)?;
            let graph = load_verse_files(&config, &project_path).await?;
            let stats = graph_stats(&graph);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stats).unwrap_or_default()
                );
            } else {
                println!("Linked {} and {}", stats.a_name, stats.b_name);
                println!("  {}: {} verses ({} unlinked)", stats.a_name, stats.a_verses, stats.a_orphans);
                println!("  {}: {} verses ({} unlinked)", stats.b_name, stats.b_verses, stats.b_orphans);
                println!("  Edges:        {}", stats.edge_count);
                println!("  Unresolved:   {}", stats.unresolved_count);
                println!("  Duplicate ids: {}", stats.duplicate_id_count);
            }
        }
        Commands::Show {
            id,
            path,
            side,
            format,
        } => {
            let project_path = resolve_path(path);
            let config = load_config(&project_path)?;
            let graph = load_verse_files(&config, &project_path).await?;

            let side = side.as_deref().map(Side::parse).transpose()?;
            let found = match side {
                Some(side) => graph.find(side, &id).map(|(position, _)| (side, position)),
                None => graph.find_any(&id).map(|(side, position, _)| (side, position)),
            };
            let Some((side, position)) = found else {
                println!("No verse found with id '{}'", id);
                return Ok(false);
            };
            let Some(view) = build_verse_view(&graph, side, position) else {
                return Ok(false);
            };

            let output_format = if format == "json" {
                OutputFormat::Json
            } else {
                OutputFormat::Markdown
            };
            match output_format {
                OutputFormat::Json => println!("{}", format_verse_as_json(&view)),
                OutputFormat::Markdown => println!("{}", format_verse_as_markdown(&view)),
            }
        }
        Commands::Check { path } => {
            let project_path = resolve_path(path);
            let config = load_config(&project_path)?;
            let graph = load_verse_files(&config, &project_path).await?;
            let issues = verify_correspondence(&graph);
            if issues.is_empty() {
                println!("All correspondences are consistent");
            } else {
                for issue in &issues {
                    println!("{} <-> {}: {}", issue.a_id, issue.b_id, issue.reason.as_str());
                }
                println!("{} inconsistent correspondences", issues.len());
                return Ok(false);
            }
        }
        Commands::Build {
            a_segments,
            b_segments,
            path,
            out_dir,
        } => {
            let project_path = resolve_path(path);
            let config = load_config(&project_path)?;
            let out_dir = out_dir.map(PathBuf::from).unwrap_or(project_path);

            let a_segments = PathBuf::from(a_segments);
            let b_segments = PathBuf::from(b_segments);
            let (a_raw, b_raw) = tokio::try_join!(
                read_segments_json(&a_segments),
                read_segments_json(&b_segments),
            )?;
            let a = Collection::new(
                config.a.name.clone(),
                hydrate_segments(a_raw, &config.a.id_prefix),
            );
            let b = Collection::new(
                config.b.name.clone(),
                hydrate_segments(b_raw, &config.b.id_prefix),
            );
            let mut graph = VerseGraph::from_collections(a, b);
            graph.link_by_overlap();

            let scheme = IdScheme::Sequential {
                a_prefix: config.a.id_prefix.clone(),
                b_prefix: config.b.id_prefix.clone(),
            };
            for side in [Side::A, Side::B] {
                let records = to_raw_records(&graph, side, &scheme);
                let out_path = output_path(&out_dir, &config.collection(side).path);
                save_verses_json(&out_path, &records)?;
                println!(
                    "{} verses: {} -> {}",
                    graph.collection(side).name,
                    records.len(),
                    out_path.display()
                );
            }
        }
    }
    Ok(true)
}

/// Resolves an optional path argument to a `PathBuf`.
///
/// Defaults to the current working directory if no path is provided.
fn resolve_path(path: Option<String>) -> PathBuf {
    match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
