pub mod config;
pub mod convert;
pub mod render;
pub mod tree;


use std::fs;
use std::path::{Path, PathBuf};

use tsambient_lib::diagnostics::DiagnosticKind;
use tsambient_lib::{Config, Diagnostics, Error};

/// Built-in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Preset {
    #[default]
    Default,
    PluginHost,
}

/// Where a command takes its configuration from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    Preset(Preset),
    File(PathBuf),
}

impl ConfigSource {
    pub fn load(&self) -> tsambient_lib::Result<Config> {
        match self {
            ConfigSource::Preset(preset) => preset.config(),
            ConfigSource::File(path) => Config::from_path(path),
        }
    }
}

impl Preset {
    pub fn config(self) -> tsambient_lib::Result<Config> {
        match self {
            Preset::Default => Ok(Config::default()),
            Preset::PluginHost => Config::plugin_host(),
        }
    }
}

/// Load configuration or exit with an error.
fn load_config(source: &ConfigSource) -> Config {
    source.load().unwrap_or_else(|e| fail(&e))
}

fn read_source(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|_| {
        eprintln!("error: file not found: {}", path.display());
        std::process::exit(1);
    })
}

fn fail(error: &Error) -> ! {
    eprintln!("error: {error}");
    std::process::exit(1);
}

/// Print a fatal error, with a source snippet when it points into a file, and exit.
fn fail_with_snippet(error: &Error, color: bool) -> ! {
    let located = match error {
        Error::Render { path, source } => {
            let mut diagnostics = Diagnostics::new();
            diagnostics.report_with(
                DiagnosticKind::UnsupportedConstruct,
                source.range.clone(),
                &source.message,
            );
            Some((path, diagnostics))
        }
        Error::Syntax { path, range } => {
            let mut diagnostics = Diagnostics::new();
            diagnostics.report(DiagnosticKind::SyntaxError, range.clone());
            Some((path, diagnostics))
        }
        _ => None,
    };

    if let Some((path, diagnostics)) = located
        && let Ok(text) = fs::read_to_string(path)
    {
        let path = path.display().to_string();
        eprint!(
            "{}",
            diagnostics.printer(&text).path(&path).colored(color).render()
        );
        std::process::exit(1);
    }
    fail(error)
}
