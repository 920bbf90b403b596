use super::{Preset, fail};

pub struct ConfigArgs {
    pub preset: Preset,
}

pub fn run(args: ConfigArgs) {
    let json = args
        .preset
        .config()
        .and_then(|config| config.to_json())
        .unwrap_or_else(|e| fail(&e));
    println!("{json}");
}
