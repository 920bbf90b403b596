//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("tsambient")
        .about("Translate Java API declarations into TypeScript ambient declarations")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(convert_command())
        .subcommand(render_command())
        .subcommand(tree_command())
        .subcommand(config_command())
}

/// Translate a source tree into one bundled artifact.
pub fn convert_command() -> Command {
    Command::new("convert")
        .about("Translate a Java source tree into one .d.ts file")
        .override_usage(
            "\
  tsambient convert <SOURCE_DIR> -o <FILE>
  tsambient convert <SOURCE_DIR> -o <FILE> --config <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  tsambient convert api/src -o api.d.ts                         # default settings
  tsambient convert api/src -o api.d.ts --preset plugin-host    # plugin-host mods and trailer
  tsambient convert api/src -o api.d.ts -c tsambient.json       # custom configuration
  tsambient convert api/src -o api.d.ts --keep-scratch --strict"#,
        )
        .arg(source_dir_arg())
        .arg(output_arg())
        .arg(config_arg())
        .arg(preset_arg())
        .arg(scratch_arg())
        .arg(keep_scratch_arg())
        .arg(strict_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Show the per-file output for one source file.
pub fn render_command() -> Command {
    Command::new("render")
        .about("Print the declarations rendered from one Java file")
        .override_usage("  tsambient render <FILE> [--config <FILE>]")
        .after_help(
            r#"EXAMPLES:
  tsambient render SoloValue.java
  tsambient render SoloValue.java --preset plugin-host --color never"#,
        )
        .arg(java_file_arg())
        .arg(config_arg())
        .arg(preset_arg())
        .arg(strict_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Dump the tree-sitter tree of a Java file.
pub fn tree_command() -> Command {
    Command::new("tree")
        .about("Show the syntax tree of a Java file")
        .override_usage("  tsambient tree <FILE> [--raw] [--spans]")
        .after_help(
            r#"EXAMPLES:
  tsambient tree SoloValue.java                 # named nodes
  tsambient tree SoloValue.java --raw --spans   # every node, with positions"#,
        )
        .arg(java_file_arg())
        .arg(raw_arg())
        .arg(spans_arg())
        .arg(verbose_arg())
}

/// Print a configuration as JSON.
pub fn config_command() -> Command {
    Command::new("config")
        .about("Print a built-in configuration as JSON")
        .override_usage("  tsambient config [--preset <NAME>]")
        .after_help(
            r#"EXAMPLES:
  tsambient config > tsambient.json             # start a custom configuration
  tsambient config --preset plugin-host"#,
        )
        .arg(preset_arg())
        .arg(verbose_arg())
}
