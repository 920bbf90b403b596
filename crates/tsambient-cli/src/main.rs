mod cli;
mod commands;
mod logging;

use cli::{ConfigParams, ConvertParams, RenderParams, TreeParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    let verbosity = matches
        .subcommand()
        .map(|(_, m)| m.get_count("verbose"))
        .unwrap_or_default();
    logging::init(verbosity);

    match matches.subcommand() {
        Some(("convert", m)) => {
            let params = ConvertParams::from_matches(m);
            commands::convert::run(params.into());
        }
        Some(("render", m)) => {
            let params = RenderParams::from_matches(m);
            commands::render::run(params.into());
        }
        Some(("tree", m)) => {
            let params = TreeParams::from_matches(m);
            commands::tree::run(params.into());
        }
        Some(("config", m)) => {
            let params = ConfigParams::from_matches(m);
            commands::config::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
