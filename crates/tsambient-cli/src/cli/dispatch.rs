//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::config::ConfigArgs;
use crate::commands::convert::ConvertArgs;
use crate::commands::render::RenderArgs;
use crate::commands::tree::TreeArgs;
use crate::commands::{ConfigSource, Preset};

pub struct ConvertParams {
    pub source_dir: PathBuf,
    pub output: PathBuf,
    pub config: ConfigSource,
    pub scratch: Option<PathBuf>,
    pub keep_scratch: bool,
    pub strict: bool,
    pub color: ColorChoice,
}

impl ConvertParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_dir: m
                .get_one::<PathBuf>("source_dir")
                .cloned()
                .unwrap_or_default(),
            output: m.get_one::<PathBuf>("output").cloned().unwrap_or_default(),
            config: parse_config_source(m),
            scratch: m.get_one::<PathBuf>("scratch").cloned(),
            keep_scratch: m.get_flag("keep_scratch"),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<ConvertParams> for ConvertArgs {
    fn from(p: ConvertParams) -> Self {
        Self {
            source_dir: p.source_dir,
            output: p.output,
            config: p.config,
            scratch: p.scratch,
            keep_scratch: p.keep_scratch,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct RenderParams {
    pub file: PathBuf,
    pub config: ConfigSource,
    pub strict: bool,
    pub color: ColorChoice,
}

impl RenderParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: m.get_one::<PathBuf>("file").cloned().unwrap_or_default(),
            config: parse_config_source(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<RenderParams> for RenderArgs {
    fn from(p: RenderParams) -> Self {
        Self {
            file: p.file,
            config: p.config,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TreeParams {
    pub file: PathBuf,
    pub raw: bool,
    pub spans: bool,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: m.get_one::<PathBuf>("file").cloned().unwrap_or_default(),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            file: p.file,
            raw: p.raw,
            spans: p.spans,
        }
    }
}

pub struct ConfigParams {
    pub preset: Preset,
}

impl ConfigParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            preset: parse_preset(m),
        }
    }
}

impl From<ConfigParams> for ConfigArgs {
    fn from(p: ConfigParams) -> Self {
        Self { preset: p.preset }
    }
}

/// An explicit `--config` file wins over `--preset`.
fn parse_config_source(m: &ArgMatches) -> ConfigSource {
    match m.get_one::<PathBuf>("config") {
        Some(path) => ConfigSource::File(path.clone()),
        None => ConfigSource::Preset(parse_preset(m)),
    }
}

fn parse_preset(m: &ArgMatches) -> Preset {
    match m.get_one::<String>("preset").map(|s| s.as_str()) {
        Some("plugin-host") => Preset::PluginHost,
        _ => Preset::Default,
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
