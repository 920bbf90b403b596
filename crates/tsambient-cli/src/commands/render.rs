use std::path::PathBuf;

use tsambient_lib::pipeline::convert_source;

use super::{ConfigSource, fail_with_snippet, load_config, read_source};

pub struct RenderArgs {
    pub file: PathBuf,
    pub config: ConfigSource,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: RenderArgs) {
    let config = load_config(&args.config);
    let source = read_source(&args.file);

    let output = convert_source(&args.file, &source, &config)
        .unwrap_or_else(|e| fail_with_snippet(&e, args.color));

    if !output.diagnostics.is_empty() {
        let path = args.file.display().to_string();
        eprint!(
            "{}",
            output
                .diagnostics
                .printer(&source)
                .path(&path)
                .colored(args.color)
                .render()
        );
        eprintln!();
    }

    print!("{}", output.text);

    if args.strict && output.diagnostics.has_warnings() {
        std::process::exit(1);
    }
}
