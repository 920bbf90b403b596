//! Tracing setup.
//!
//! Output goes to stderr so it never mixes with a blob printed to stdout.
//! `TSAMBIENT_LOG` takes precedence over `RUST_LOG`; both use the
//! `RUST_LOG` filter syntax. Without either, the level comes from `-v`.

use tracing_subscriber::EnvFilter;

fn build_filter(verbosity: u8) -> EnvFilter {
    if let Ok(val) = std::env::var("TSAMBIENT_LOG") {
        return EnvFilter::builder().parse_lossy(val);
    }
    if std::env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }

    // Skipped constructs are rendered as diagnostics, not log lines.
    let directives = match verbosity {
        0 => "warn,tsambient_lib::convert=error",
        1 => "debug",
        _ => "trace",
    };
    EnvFilter::new(directives)
}

pub fn init(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
