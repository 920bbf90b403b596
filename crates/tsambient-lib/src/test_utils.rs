//! Test helpers for converting Java fixtures.

use std::path::Path;

use crate::config::Config;
use crate::convert::{Converter, FileOutput, RenderError};
use crate::pipeline::convert_source;
use crate::query::query;
use crate::{Error, lang};

/// Convert a fixture with the default configuration.
pub fn convert(source: &str) -> FileOutput {
    convert_with(source, &Config::default())
}

pub fn convert_with(source: &str, config: &Config) -> FileOutput {
    match convert_source(Path::new("Fixture.java"), source, config) {
        Ok(output) => output,
        Err(e) => panic!("fixture failed to convert: {e}\n{source}"),
    }
}

/// Convert a fixture expected to hit a structural error.
pub fn render_error(source: &str) -> RenderError {
    match convert_source(Path::new("Fixture.java"), source, &Config::default()) {
        Err(Error::Render { source, .. }) => source,
        Err(e) => panic!("expected a render error, got: {e}"),
        Ok(output) => panic!("expected a render error, got:\n{}", output.text),
    }
}

/// Result types of every method in an interface body, rendered in order.
pub fn result_types(body: &str) -> Vec<String> {
    result_types_with(body, &Config::default())
}

pub fn result_types_with(body: &str, config: &Config) -> Vec<String> {
    let source = format!("package fixture;\ninterface Types {{\n{body}\n}}\n");
    let tree = lang::parse(&source).expect("fixture parses");
    let converter = Converter::new(&source, config);
    query(tree.root_node(), &["method_declaration"])
        .into_iter()
        .map(|method| {
            let ty = method.child_by_field_name("type").expect("method has a type");
            converter.render_type(ty).expect("type renders")
        })
        .collect()
}
