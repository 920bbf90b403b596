//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Root of the Java source tree (positional).
pub fn source_dir_arg() -> Arg {
    Arg::new("source_dir")
        .value_name("SOURCE_DIR")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Directory containing the Java API sources")
}

/// Single Java source file (positional).
pub fn java_file_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Java source file")
}

/// Artifact path (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Write the bundled declarations to FILE")
}

/// Configuration file (-c/--config).
pub fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON configuration file (overrides --preset)")
}

/// Built-in configuration (--preset).
pub fn preset_arg() -> Arg {
    Arg::new("preset")
        .long("preset")
        .value_name("NAME")
        .default_value("default")
        .value_parser(["default", "plugin-host"])
        .help("Built-in configuration")
}

/// Scratch directory for per-file output (--scratch).
pub fn scratch_arg() -> Arg {
    Arg::new("scratch")
        .long("scratch")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Directory for per-file output, empty or from an earlier run (default: <OUTPUT>.parts)")
}

/// Keep per-file output (--keep-scratch).
pub fn keep_scratch_arg() -> Arg {
    Arg::new("keep_scratch")
        .long("keep-scratch")
        .action(ArgAction::SetTrue)
        .help("Keep per-file output after bundling")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Include anonymous nodes (--raw).
pub fn raw_arg() -> Arg {
    Arg::new("raw")
        .long("raw")
        .action(ArgAction::SetTrue)
        .help("Include anonymous nodes (keywords, punctuation)")
}

/// Show source positions (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .help("Show source positions")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for debug, -vv for trace)")
}
