use crate::config::Config;
use crate::rules::RuleSet;
use anyhow::{bail, Context, Result};
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for a rewrite run
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Directory tree to scan
    pub root: PathBuf,
    /// Report matches without writing anything back
    pub dry_run: bool,
    /// Suppress the startup banner and per-file progress lines
    pub quiet: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            dry_run: false,
            quiet: false,
        }
    }
}

/// What a rewrite run did, for the final report
#[derive(Debug, Serialize, Deserialize)]
pub struct RewriteReport {
    pub root: PathBuf,
    /// Eligible files that were opened and scanned
    pub files_scanned: usize,
    /// Files where at least one rule matched, in walk order
    pub files_rewritten: Vec<PathBuf>,
    /// Files that failed to read or write and were skipped
    pub errors: usize,
    pub dry_run: bool,
}

/// Walker over the full tree: generated Xcode projects are usually not
/// git repositories, so every ignore facility is off and hidden files
/// are included. Symlinks are not followed, which keeps cyclic links
/// from recursing forever.
fn configure_walker(root: &Path) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    builder
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .hidden(false)
        .follow_links(false);
    builder
}

/// A file qualifies if any configured extension appears anywhere in its
/// path. Substring, not suffix: schemes live under `xcshareddata/` and
/// project files inside `*.xcodeproj/` bundles, and the path as a whole
/// is what identifies them.
fn is_eligible(path: &Path, extensions: &[String]) -> bool {
    let path_str = path.to_string_lossy();
    extensions.iter().any(|ext| path_str.contains(ext.as_str()))
}

/// Read one file, run the rules, and write it back if anything matched.
/// Returns whether the file was (or in a dry run, would be) rewritten.
fn process_file(path: &Path, rules: &RuleSet, dry_run: bool) -> Result<bool> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    match rules.apply(&content) {
        Some(rewritten) => {
            if !dry_run {
                fs::write(path, rewritten)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            Ok(true)
        },
        None => Ok(false),
    }
}

/// Walk `options.root` and rewrite every eligible file the rule set
/// matches. A file that fails to read or write is logged and skipped;
/// only problems with the root itself abort the run.
pub fn rewrite_tree(
    options: &RewriteOptions,
    config: &Config,
    rules: &RuleSet,
) -> Result<RewriteReport> {
    let metadata = fs::metadata(&options.root)
        .with_context(|| format!("failed to read root directory {}", options.root.display()))?;
    if !metadata.is_dir() {
        bail!("{} is not a directory", options.root.display());
    }

    if !options.quiet {
        println!("Reading directory: {}", options.root.display());
        println!("Rules:");
        for rule in rules.iter() {
            println!("  {:?} -> {:?}", rule.find_str(), rule.replacement());
        }
        println!("Extensions: {:?}", config.extensions);
    }

    let mut report = RewriteReport {
        root: options.root.clone(),
        files_scanned: 0,
        files_rewritten: Vec::new(),
        errors: 0,
        dry_run: options.dry_run,
    };

    for entry in configure_walker(&options.root).build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("Error walking tree: {err}");
                report.errors += 1;
                continue;
            },
        };

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        if !is_eligible(path, &config.extensions) {
            continue;
        }

        report.files_scanned += 1;

        match process_file(path, rules, options.dry_run) {
            Ok(true) => {
                if !options.quiet {
                    println!("Replacing absolute paths in {}", path.display());
                }
                report.files_rewritten.push(path.to_path_buf());
            },
            Ok(false) => {},
            Err(err) => {
                eprintln!("Error processing {}: {err:#}", path.display());
                report.errors += 1;
            },
        }
    }

    Ok(report)
}
