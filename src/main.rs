mod config;
mod engine;
mod highlight;
mod indexer;
mod lexer;
mod matches;
mod output;
mod payload;
mod progress;
mod query;
mod unit;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use engine::EngineClient;
use matches::LineMatches;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "beeline")]
#[command(about = "Source-code search front end with payload-encoded line positions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine address (overrides config)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Engine index name (overrides config)
    #[arg(long, global = true)]
    index: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk directories and submit changed files to the engine
    Index {
        /// Directories to index
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Resubmit everything, ignoring stored content hashes
        #[arg(short, long)]
        force: bool,

        /// Suppress the progress bar and per-run output
        #[arg(short, long)]
        quiet: bool,
    },
    /// Search and render highlighted excerpts
    Search {
        /// Query; prefix a word with @ to match the file path
        query: Vec<String>,

        /// Show one specific document in full
        #[arg(long)]
        id: Option<String>,

        /// Result page
        #[arg(short, long, default_value_t = 0)]
        page: usize,

        /// Require all terms to match on a single line
        #[arg(long)]
        same_line: bool,

        /// Context lines around each best-matching line
        #[arg(short, long)]
        context: Option<u32>,

        /// Emit HTML excerpts instead of colored terminal output
        #[arg(long)]
        html: bool,
    },
    /// Show engine statistics
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(index) = cli.index {
        config.index = index;
    }

    match cli.command {
        Commands::Index { paths, force, quiet } => {
            let mut client = EngineClient::connect(&config.host, &config.index)?;
            let mut total = indexer::IndexSummary::default();
            for path in &paths {
                let summary = indexer::index_tree(&mut client, &config, path, force, quiet)?;
                total.indexed += summary.indexed;
                total.skipped_unchanged += summary.skipped_unchanged;
                total.too_large += summary.too_large;
                total.errors += summary.errors;
            }
            if !quiet {
                println!(
                    "Done: {} indexed, {} unchanged",
                    total.indexed, total.skipped_unchanged
                );
                if total.too_large > 0 {
                    println!("{} files skipped (over the size limit)", total.too_large);
                }
            }
            if total.errors > 0 {
                eprintln!("{} files could not be read", total.errors);
            }
        }
        Commands::Search {
            query,
            id,
            page,
            same_line,
            context,
            html,
        } => {
            let raw = query.join(" ");
            run_search(&config, &raw, id, page, same_line, context, html)?;
        }
        Commands::Stats => {
            let mut client = EngineClient::connect(&config.host, &config.index)?;
            let stat = client.stat()?;
            println!("documents: {}", stat.docs);
            for index in &stat.indexes {
                println!("  index: {}", index);
            }
        }
    }

    Ok(())
}

fn run_search(
    config: &Config,
    raw: &str,
    id: Option<String>,
    page: usize,
    same_line: bool,
    context: Option<u32>,
    html: bool,
) -> Result<()> {
    let whole_file = id.is_some();
    let mut search_query = query::build_query(raw, same_line);
    search_query.id = id;

    if search_query.is_empty() {
        println!("empty query");
        return Ok(());
    }

    let context_radius = context.unwrap_or(config.context_radius);

    // Engine failures surface as a displayed error with a -1 total, never
    // partial results
    let results = EngineClient::connect(&config.host, &config.index)
        .and_then(|mut client| client.search(search_query, page, config.page_size));

    let results = match results {
        Ok(results) => results,
        Err(err) => {
            output::print_error(&err.to_string())?;
            println!("matching documents: -1");
            return Ok(());
        }
    };

    output::print_header(&results, page, config.page_size)?;

    for hit in &results.hits {
        let matches = LineMatches::from_state(&hit.match_state);
        let lines: Vec<&str> = unit::split_lines(&hit.display_content).collect();
        let rendered = highlight::render(&lines, &matches, whole_file, context_radius);

        if html {
            println!("<pre id=\"{}\">", highlight::escape_html(&hit.id));
            println!("{}", highlight::excerpt_html(&rendered));
            println!("</pre>");
        } else {
            output::print_hit(&hit.id, hit.score, matches.matched_lines(), &rendered)?;
        }
    }

    Ok(())
}
