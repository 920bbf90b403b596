//! Post-generation patches ("mods").
//!
//! Each mod targets one per-file output, optionally narrowed to one
//! declaration block, and performs one substitution. Mods are re-entrant:
//! a match whose replacement is already in place is left alone, and a mod
//! with nothing left to match is recognised by its replacement text (or by
//! its `applied` pattern when the replacement uses captures), so the full
//! list can be applied any number of times. A mod that finds nothing
//! to do and no trace of its replacement is stale and fails the run.

use std::fs;
use std::ops::Range;
use std::path::Path;

use regex_automata::meta::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One patch record.
///
/// On disk a record names exactly one of `pattern` or `literal`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ModRecord", into = "ModRecord")]
pub struct Mod {
    /// Per-file output path relative to the scratch root (`a/b/Foo.d.ts`).
    pub target: String,
    /// Declaration whose block bounds the search.
    pub scope: Option<String>,
    pub find: Find,
    pub replace: String,
    /// Pattern recognising text this mod has already rewritten. Needed for
    /// capture-based replacements, which cannot be looked up literally.
    pub applied: Option<String>,
}

/// What a mod searches for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Find {
    /// Regular expression; every match is replaced, `$1`/`${name}` interpolate.
    Pattern(String),
    /// Literal text; only the first occurrence is replaced.
    Literal(String),
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModRecord {
    target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    literal: Option<String>,
    replace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    applied: Option<String>,
}

impl TryFrom<ModRecord> for Mod {
    type Error = String;

    fn try_from(record: ModRecord) -> std::result::Result<Self, Self::Error> {
        let find = match (record.pattern, record.literal) {
            (Some(pattern), None) => Find::Pattern(pattern),
            (None, Some(literal)) => Find::Literal(literal),
            (Some(_), Some(_)) => {
                return Err(format!(
                    "mod for `{}` sets both `pattern` and `literal`",
                    record.target
                ));
            }
            (None, None) => {
                return Err(format!(
                    "mod for `{}` needs `pattern` or `literal`",
                    record.target
                ));
            }
        };
        Ok(Self {
            target: record.target,
            scope: record.scope,
            find,
            replace: record.replace,
            applied: record.applied,
        })
    }
}

impl From<Mod> for ModRecord {
    fn from(m: Mod) -> Self {
        let (pattern, literal) = match m.find {
            Find::Pattern(p) => (Some(p), None),
            Find::Literal(l) => (None, Some(l)),
        };
        Self {
            target: m.target,
            scope: m.scope,
            pattern,
            literal,
            replace: m.replace,
            applied: m.applied,
        }
    }
}

/// Result of applying one mod.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModOutcome {
    /// Number of matches rewritten.
    Applied(usize),
    /// Every match already carries the replacement.
    AlreadyApplied,
    NoMatch,
}

impl Mod {
    pub fn pattern(target: &str, pattern: &str, replace: &str) -> Self {
        Self {
            target: target.to_string(),
            scope: None,
            find: Find::Pattern(pattern.to_string()),
            replace: replace.to_string(),
            applied: None,
        }
    }

    pub fn literal(target: &str, literal: &str, replace: &str) -> Self {
        Self {
            target: target.to_string(),
            scope: None,
            find: Find::Literal(literal.to_string()),
            replace: replace.to_string(),
            applied: None,
        }
    }

    /// Narrow the search to the block of the named declaration.
    pub fn in_declaration(mut self, name: &str) -> Self {
        self.scope = Some(name.to_string());
        self
    }

    /// Recognise an earlier application by `pattern` instead of by the
    /// replacement text.
    pub fn applied_when(mut self, pattern: &str) -> Self {
        self.applied = Some(pattern.to_string());
        self
    }
}

/// Apply every mod in order against files under `root`.
///
/// Fails on the first stale mod, leaving earlier rewrites in place.
pub fn apply_mods(root: &Path, mods: &[Mod]) -> Result<Vec<ModOutcome>> {
    let mut outcomes = Vec::with_capacity(mods.len());

    for (index, m) in mods.iter().enumerate() {
        let path = root.join(&m.target);
        if !path.is_file() {
            return Err(Error::StaleMod {
                index,
                target: m.target.clone(),
                reason: "target file does not exist".to_string(),
            });
        }

        let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let (patched, outcome) = apply_to_text(index, m, &text)?;

        match outcome {
            ModOutcome::Applied(count) => {
                tracing::debug!(index, target = %m.target, count, "mod applied");
                fs::write(&path, patched).map_err(|e| Error::io(&path, e))?;
            }
            ModOutcome::AlreadyApplied => {
                tracing::warn!(index, target = %m.target, "mod already applied");
            }
            ModOutcome::NoMatch => {
                return Err(Error::StaleMod {
                    index,
                    target: m.target.clone(),
                    reason: "pattern matched nothing".to_string(),
                });
            }
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Apply one mod to in-memory text.
///
/// `index` only labels errors. A missing scope declaration is an error;
/// a pattern that matches nothing is reported as [`ModOutcome::NoMatch`].
pub fn apply_to_text(index: usize, m: &Mod, text: &str) -> Result<(String, ModOutcome)> {
    let region = match &m.scope {
        Some(name) => declaration_block(text, name).ok_or_else(|| Error::StaleMod {
            index,
            target: m.target.clone(),
            reason: format!("declaration `{name}` not found"),
        })?,
        None => 0..text.len(),
    };

    let edits: Vec<(Range<usize>, String)> = match &m.find {
        Find::Literal(literal) => text[region.clone()]
            .find(literal.as_str())
            .map(|at| {
                let start = region.start + at;
                (start..start + literal.len(), m.replace.clone())
            })
            .into_iter()
            .collect(),
        Find::Pattern(pattern) => {
            let re = compile(index, m, pattern)?;
            let haystack = &text[region.clone()];
            re.captures_iter(haystack)
                .filter_map(|caps| {
                    let found = caps.get_match()?;
                    let replacement = caps.interpolate_string(haystack, &m.replace);
                    let range = region.start + found.start()..region.start + found.end();
                    Some((range, replacement))
                })
                .collect()
        }
    };

    if edits.is_empty() {
        let outcome = if replacement_present(index, m, &text[region])? {
            ModOutcome::AlreadyApplied
        } else {
            ModOutcome::NoMatch
        };
        return Ok((text.to_string(), outcome));
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut applied = 0;
    for (range, replacement) in edits {
        if is_in_place(text, &range, &replacement) {
            continue;
        }
        out.push_str(&text[cursor..range.start]);
        out.push_str(&replacement);
        cursor = range.end;
        applied += 1;
    }
    out.push_str(&text[cursor..]);

    if applied == 0 {
        return Ok((text.to_string(), ModOutcome::AlreadyApplied));
    }
    Ok((out, ModOutcome::Applied(applied)))
}

/// Whether the text around a match already reads as the replacement.
///
/// Covers insertion mods whose replacement embeds the matched text as a
/// suffix (text inserted before) or prefix (text inserted after).
fn is_in_place(text: &str, range: &Range<usize>, replacement: &str) -> bool {
    text[..range.end].ends_with(replacement) || text[range.start..].starts_with(replacement)
}

/// A mod with nothing left to match whose rewrite already sits in the
/// searched text.
///
/// Without an `applied` pattern, replacements with capture references
/// cannot be checked and count as absent.
fn replacement_present(index: usize, m: &Mod, region: &str) -> Result<bool> {
    if let Some(applied) = &m.applied {
        return Ok(compile(index, m, applied)?.is_match(region));
    }
    if m.replace.is_empty() {
        return Ok(false);
    }
    if matches!(m.find, Find::Pattern(_)) && m.replace.contains('$') {
        return Ok(false);
    }
    Ok(region.contains(m.replace.as_str()))
}

fn compile(index: usize, m: &Mod, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidModPattern {
        index,
        target: m.target.clone(),
        message: e.to_string(),
    })
}

/// Byte range of a declaration block: its header line through the first
/// following line that is a lone `}`.
pub fn declaration_block(text: &str, name: &str) -> Option<Range<usize>> {
    let mut offset = 0;
    let mut start = None;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        match start {
            None => {
                if declares(line, name) {
                    start = Some(line_start);
                }
            }
            Some(begin) => {
                if line.trim_end() == "}" {
                    return Some(begin..offset);
                }
            }
        }
    }
    None
}

fn declares(line: &str, name: &str) -> bool {
    let mut rest = line.trim_start();
    for prefix in ["export ", "declare ", "abstract "] {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped;
        }
    }

    let Some(rest) = ["interface ", "class ", "enum "]
        .iter()
        .find_map(|keyword| rest.strip_prefix(keyword))
    else {
        return false;
    };

    rest.strip_prefix(name).is_some_and(|after| {
        !after
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
    })
}

#[cfg(test)]
#[path = "mods_tests.rs"]
mod mods_tests;
