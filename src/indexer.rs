//! Directory indexing driver (write path).
//!
//! Walks source trees, builds indexable units in parallel, and submits them
//! to the engine in batches. Before sending, the engine's stored content
//! hashes are fetched so unchanged units are skipped; the walk yields each
//! path once, so writes to a given id are naturally serialized.

use crate::config::Config;
use crate::engine::EngineClient;
use crate::unit::{self, IndexableUnit};
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use crate::progress::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Documents per Save request
const BATCH_SIZE: usize = 100;

/// Source extensions worth indexing
const SOURCE_EXTENSIONS: [&str; 12] = [
    "c", "h", "java", "pm", "pl", "rb", "rs", "py", "go", "js", "clj", "sh",
];

/// Files larger than this are skipped (dumps, bundles, generated blobs)
const MAX_FILE_SIZE: u64 = 4 * 1024 * 1024;

/// Outcome of one indexing run.
#[derive(Debug, Default)]
pub struct IndexSummary {
    pub indexed: usize,
    pub skipped_unchanged: usize,
    pub too_large: usize,
    pub errors: usize,
}

/// What happened to a single candidate file.
enum FileOutcome {
    Unit(IndexableUnit),
    TooLarge,
    Unreadable,
}

fn read_unit(full_path: &Path, rel_path: &str, max_size: u64) -> FileOutcome {
    let content = match fs::read(full_path) {
        Ok(content) => content,
        Err(_) => return FileOutcome::Unreadable,
    };
    if content.len() as u64 > max_size {
        return FileOutcome::TooLarge;
    }
    FileOutcome::Unit(unit::build(rel_path, &content))
}

fn source_globs() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for ext in SOURCE_EXTENSIONS {
        builder.add(Glob::new(&format!("*.{ext}"))?);
    }
    builder.build().context("Invalid source glob set")
}

/// Walk `root` and submit every changed source file to the engine.
pub fn index_tree(
    client: &mut EngineClient,
    config: &Config,
    root: &Path,
    force: bool,
    silent: bool,
) -> Result<IndexSummary> {
    let root = root.canonicalize().context("Invalid path")?;
    let globs = source_globs()?;

    if !silent {
        println!("Indexing: {} -> index '{}'", root.display(), config.index);
    }

    // Known hashes let us skip units the engine already has
    let known_hashes: HashMap<String, u32> = if force {
        HashMap::new()
    } else {
        client
            .hashes()
            .context("Failed to fetch stored content hashes")?
    };

    let walker = WalkBuilder::new(&root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !matches!(
                name.as_ref(),
                ".git" | "node_modules" | "target" | "__pycache__" | ".venv" | "venv"
            )
        })
        .build();

    let file_entries: Vec<(PathBuf, String)> = walker
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter(|entry| globs.is_match(entry.path()))
        .filter_map(|entry| {
            let path = entry.path().to_path_buf();
            let rel = path
                .strip_prefix(&root)
                .ok()?
                .to_string_lossy()
                .into_owned();
            Some((path, rel))
        })
        .collect();

    let progress_bar = if !silent {
        let pb = ProgressBar::new(file_entries.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓▒░  "),
        );
        pb.set_message("Encoding files...");
        Some(pb)
    } else {
        None
    };

    let mut summary = IndexSummary::default();
    let mut batch: Vec<IndexableUnit> = Vec::with_capacity(BATCH_SIZE);

    for chunk in file_entries.chunks(BATCH_SIZE) {
        // Read and encode the chunk in parallel; submission stays ordered
        let outcomes: Vec<FileOutcome> = chunk
            .par_iter()
            .map(|(full_path, rel_path)| read_unit(full_path, rel_path, MAX_FILE_SIZE))
            .collect();

        for outcome in outcomes {
            if let Some(ref pb) = progress_bar {
                pb.inc(1);
            }

            let unit = match outcome {
                FileOutcome::Unit(unit) => unit,
                FileOutcome::TooLarge => {
                    summary.too_large += 1;
                    continue;
                }
                FileOutcome::Unreadable => {
                    summary.errors += 1;
                    continue;
                }
            };

            if known_hashes.get(&unit.id) == Some(&unit.content_hash) {
                summary.skipped_unchanged += 1;
                continue;
            }

            batch.push(unit);
            if batch.len() >= BATCH_SIZE {
                summary.indexed += submit_batch(client, &mut batch)?;
            }
        }
    }

    if !batch.is_empty() {
        summary.indexed += submit_batch(client, &mut batch)?;
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message(format!(
            "{} indexed, {} unchanged",
            summary.indexed, summary.skipped_unchanged
        ));
    }

    Ok(summary)
}

fn submit_batch(client: &mut EngineClient, batch: &mut Vec<IndexableUnit>) -> Result<usize> {
    let documents = batch
        .drain(..)
        .map(|unit| crate::engine::protocol::Document {
            id: unit.id,
            display_content: unit.display_content,
            encoded_tokens: unit.encoded_tokens,
            content_hash: unit.content_hash,
        })
        .collect();

    client
        .save(documents, true)
        .context("Failed to submit document batch")
}
