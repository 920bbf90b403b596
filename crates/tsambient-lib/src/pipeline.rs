//! Source tree to single declaration artifact.
//!
//! Stages run strictly in sequence: discover, convert each file, write
//! per-file blobs to a scratch tree, apply mods, bundle, write the
//! artifact. Any error aborts the run before the artifact is written.
//!
//! The scratch tree is marked as ours when a run starts in it. A run only
//! ever clears a marked tree; an unmarked one must be empty. Cleanup removes
//! the blobs the run wrote and the directories left empty by that.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::bundle::Bundle;
use crate::config::Config;
use crate::convert::{self, Converter, FileOutput};
use crate::diagnostics::Diagnostics;
use crate::mods::{self, ModOutcome};
use crate::{Error, Result, lang};

const SCRATCH_MARKER: &str = ".tsambient-scratch";

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct Report {
    /// Source files converted.
    pub files: usize,
    /// Interfaces, classes and enums rendered across all files.
    pub declarations: usize,
    /// Files with expected omissions, in conversion order.
    pub warnings: Vec<FileWarnings>,
    pub mods: Vec<ModOutcome>,
    /// Path of the written artifact.
    pub output: PathBuf,
}

/// Warnings collected while converting one file.
#[derive(Debug, Clone)]
pub struct FileWarnings {
    pub path: PathBuf,
    /// Source text, kept for rendering snippets.
    pub source: String,
    pub diagnostics: Diagnostics,
}

impl Report {
    pub fn warning_count(&self) -> usize {
        self.warnings
            .iter()
            .map(|w| w.diagnostics.warning_count())
            .sum()
    }
}

pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scratch tree used for an artifact at `output`.
    pub fn scratch_dir(&self, output: &Path) -> PathBuf {
        match &self.config.scratch_dir {
            Some(dir) => dir.clone(),
            None => {
                let mut name = output.as_os_str().to_os_string();
                name.push(".parts");
                PathBuf::from(name)
            }
        }
    }

    /// Translate every `.java` file under `source_dir` into one artifact at `output`.
    pub fn run(&self, source_dir: &Path, output: &Path) -> Result<Report> {
        let sources = discover(source_dir)?;
        tracing::debug!(count = sources.len(), dir = %source_dir.display(), "discovered sources");

        let scratch = self.scratch_dir(output);
        let created_scratch = prepare_scratch(&scratch)?;

        let mut declarations = 0;
        let mut warnings = Vec::new();
        let mut blobs = Vec::with_capacity(sources.len());

        for rel in &sources {
            let path = source_dir.join(rel);
            let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
            tracing::debug!(file = %rel.display(), "converting");

            let FileOutput {
                text: blob,
                declarations: count,
                diagnostics,
                ..
            } = convert_source(&path, &text, &self.config)?;
            declarations += count;

            let blob_rel = rel.with_extension("d.ts");
            let blob_path = scratch.join(&blob_rel);
            if let Some(parent) = blob_path.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
            fs::write(&blob_path, blob).map_err(|e| Error::io(&blob_path, e))?;
            blobs.push((rel, blob_path));

            if !diagnostics.is_empty() {
                warnings.push(FileWarnings {
                    path,
                    source: text,
                    diagnostics,
                });
            }
        }

        let mod_outcomes = mods::apply_mods(&scratch, &self.config.mods)?;

        let mut bundle = Bundle::new();
        for (rel, blob_path) in &blobs {
            let blob = fs::read_to_string(blob_path).map_err(|e| Error::io(blob_path, e))?;
            bundle.add(&slash_path(rel), &blob)?;
        }
        let artifact = bundle.render(&self.config.trailer);

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(output, artifact).map_err(|e| Error::io(output, e))?;
        tracing::info!(
            output = %output.display(),
            files = sources.len(),
            declarations,
            "artifact written"
        );

        if self.config.keep_scratch {
            tracing::debug!(scratch = %scratch.display(), "keeping scratch tree");
        } else {
            let written: Vec<&Path> = blobs.iter().map(|(_, path)| path.as_path()).collect();
            clean_scratch(&scratch, &written, created_scratch)?;
        }

        Ok(Report {
            files: sources.len(),
            declarations,
            warnings,
            mods: mod_outcomes,
            output: output.to_path_buf(),
        })
    }
}

/// Make `scratch` ready for a run. Returns whether the directory was created.
fn prepare_scratch(scratch: &Path) -> Result<bool> {
    let created = !scratch.exists();
    if created {
        fs::create_dir_all(scratch).map_err(|e| Error::io(scratch, e))?;
    } else if scratch.join(SCRATCH_MARKER).is_file() {
        tracing::debug!(scratch = %scratch.display(), "clearing previous scratch tree");
        for entry in fs::read_dir(scratch).map_err(|e| Error::io(scratch, e))? {
            let path = entry.map_err(|e| Error::io(scratch, e))?.path();
            let removed = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            removed.map_err(|e| Error::io(&path, e))?;
        }
    } else {
        let mut entries = fs::read_dir(scratch).map_err(|e| Error::io(scratch, e))?;
        if entries.next().is_some() {
            return Err(Error::ScratchNotEmpty {
                path: scratch.to_path_buf(),
            });
        }
    }

    let marker = scratch.join(SCRATCH_MARKER);
    fs::write(&marker, "").map_err(|e| Error::io(&marker, e))?;
    Ok(created)
}

/// Remove the blobs a run wrote, then every directory left empty.
fn clean_scratch(scratch: &Path, written: &[&Path], remove_root: bool) -> Result<()> {
    let marker = scratch.join(SCRATCH_MARKER);
    for path in written.iter().copied().chain([marker.as_path()]) {
        fs::remove_file(path).map_err(|e| Error::io(path, e))?;
    }

    let dirs = WalkDir::new(scratch)
        .min_depth(1)
        .contents_first(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir());
    for dir in dirs {
        // Fails on directories that still hold something we did not write.
        let _ = fs::remove_dir(dir.path());
    }
    if remove_root {
        let _ = fs::remove_dir(scratch);
    }
    Ok(())
}

/// Convert one in-memory source file.
///
/// `path` only labels errors.
pub fn convert_source(path: &Path, text: &str, config: &Config) -> Result<FileOutput> {
    let tree = lang::parse(text).ok_or_else(|| Error::Parse {
        path: path.to_path_buf(),
    })?;
    let root = tree.root_node();

    if let Some(range) = lang::first_error(root) {
        return Err(Error::Syntax {
            path: path.to_path_buf(),
            range,
        });
    }

    let namespace = convert::package_name(root, text).ok_or_else(|| Error::MissingPackage {
        path: path.to_path_buf(),
    })?;

    Converter::new(text, config)
        .convert(root, namespace)
        .map_err(|source| Error::Render {
            path: path.to_path_buf(),
            source,
        })
}

/// `.java` files under `dir`, relative to it, sorted.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            Error::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().is_none_or(|ext| ext != "java") {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(dir) {
            sources.push(rel.to_path_buf());
        }
    }

    sources.sort();
    Ok(sources)
}

/// Relative path with `/` separators on every platform.
fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod pipeline_tests;
