//! Namespace bundling.
//!
//! Per-file blobs are grouped by the namespace named on their first line
//! and emitted as `declare namespace X { ... }` blocks. Namespaces come out
//! in lexicographic order, files within a namespace ordered by source
//! path, so the artifact depends only on the set of inputs. Imports are
//! deduplicated per namespace, and self-imports are dropped.

use std::collections::{BTreeMap, HashSet};

use crate::{Error, Result};

const INDENT: &str = "  ";

#[derive(Debug, Clone, Default)]
pub struct Bundle {
    namespaces: BTreeMap<String, Vec<FileBlock>>,
}

#[derive(Debug, Clone)]
struct FileBlock {
    source: String,
    body: String,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one blob, keyed by its source path (`a/b/Foo.java`).
    pub fn add(&mut self, source: &str, blob: &str) -> Result<()> {
        let (first, body) = blob.split_once('\n').unwrap_or((blob, ""));
        let namespace = first
            .strip_prefix("namespace ")
            .map(str::trim)
            .filter(|ns| !ns.is_empty())
            .ok_or_else(|| Error::MissingNamespace {
                path: source.into(),
            })?;

        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .push(FileBlock {
                source: source.to_string(),
                body: body.to_string(),
            });
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Namespace ids in output order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    /// Render every namespace, then `trailer`. Ends with exactly one newline.
    pub fn render(&self, trailer: &str) -> String {
        let mut sections = Vec::new();

        for (namespace, blocks) in &self.namespaces {
            let mut blocks: Vec<_> = blocks.iter().collect();
            blocks.sort_by(|a, b| a.source.cmp(&b.source));

            let mut seen = HashSet::new();
            let mut lines = Vec::new();
            for block in blocks {
                let kept = block.body.lines().filter(|line| match import_target(line) {
                    Some(target) => {
                        let is_self = target
                            .rsplit_once('.')
                            .is_some_and(|(package, _)| package == namespace);
                        !is_self && seen.insert(line.trim().to_string())
                    }
                    None => true,
                });

                if !lines.is_empty() {
                    lines.push(String::new());
                }
                lines.push(format!("// source: {}", block.source));
                push_collapsed(&mut lines, kept);
            }

            let mut section = format!("declare namespace {namespace} {{\n");
            for line in lines {
                if !line.is_empty() {
                    section.push_str(INDENT);
                    section.push_str(&line);
                }
                section.push('\n');
            }
            section.push('}');
            sections.push(section);
        }

        if !trailer.trim().is_empty() {
            sections.push(trailer.trim_end_matches(['\n', '\r']).to_string());
        }

        let mut out = sections.join("\n\n");
        out.push('\n');
        out
    }
}

/// Qualified target of an `import X = a.b.X;` line.
fn import_target(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix("import ")?;
    let (alias, target) = rest.split_once(" = ")?;
    let target = target.strip_suffix(';')?;
    let is_ident = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace);
    (is_ident(alias) && is_ident(target)).then_some(target)
}

/// Append body lines, dropping leading and repeated blank lines.
fn push_collapsed<'a>(lines: &mut Vec<String>, body: impl Iterator<Item = &'a str>) {
    let mut blank = false;
    let mut started = false;
    for line in body {
        if line.trim().is_empty() {
            blank = started;
            continue;
        }
        if blank {
            lines.push(String::new());
            blank = false;
        }
        lines.push(line.to_string());
        started = true;
    }
}

#[cfg(test)]
#[path = "bundle_tests.rs"]
mod bundle_tests;
