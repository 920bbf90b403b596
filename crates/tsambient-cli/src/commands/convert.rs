use std::path::PathBuf;

use tsambient_lib::Pipeline;

use super::{ConfigSource, fail_with_snippet, load_config};

pub struct ConvertArgs {
    pub source_dir: PathBuf,
    pub output: PathBuf,
    pub config: ConfigSource,
    pub scratch: Option<PathBuf>,
    pub keep_scratch: bool,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: ConvertArgs) {
    let mut config = load_config(&args.config);
    if let Some(dir) = args.scratch {
        config = config.scratch_dir(dir);
    }
    if args.keep_scratch {
        config = config.keep_scratch(true);
    }

    tracing::debug!(
        source_dir = %args.source_dir.display(),
        output = %args.output.display(),
        "converting"
    );
    let report = Pipeline::new(config)
        .run(&args.source_dir, &args.output)
        .unwrap_or_else(|e| fail_with_snippet(&e, args.color));

    for file in &report.warnings {
        let path = file.path.display().to_string();
        eprint!(
            "{}",
            file.diagnostics
                .printer(&file.source)
                .path(&path)
                .colored(args.color)
                .render()
        );
        eprintln!();
    }

    let warnings = report.warning_count();
    eprintln!(
        "{} files, {} declarations, {} warnings -> {}",
        report.files,
        report.declarations,
        warnings,
        report.output.display()
    );

    if args.strict && warnings > 0 {
        std::process::exit(1);
    }
}
