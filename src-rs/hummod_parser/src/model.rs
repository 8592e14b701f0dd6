//! Lowering of a parsed `<structure>` element into a [`ParsedModel`].

use hummod_ir::ParsedModel;
use indexmap::IndexMap;
use tracing::debug;

use crate::{
    config::Config, definition::lower_block, error::ParserError, function::lower_functions,
    markup::Element, variable::lower_variables,
};

/// Lowers the root element. Each of the three sections is optional.
pub fn lower_model(root: &Element, config: &Config) -> Result<ParsedModel, ParserError> {
    let variables = root
        .child("variables")
        .map(lower_variables)
        .unwrap_or_default();

    let functions = match root.child("functions") {
        Some(section) => lower_functions(section, config)?,
        None => IndexMap::new(),
    };

    let definitions = root
        .child("definitions")
        .map(lower_block)
        .unwrap_or_default();

    debug!(
        variables = variables.len(),
        functions = functions.len(),
        definitions = definitions.entries().len(),
        "lowered module structure"
    );

    Ok(ParsedModel::new(variables, functions, definitions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::element;

    #[test]
    fn empty_structure() {
        let model = lower_model(&element("<structure/>"), &Config::new()).expect("should lower");

        assert!(model.variables().is_empty());
        assert!(model.functions().is_empty());
        assert!(model.definitions().is_empty());
    }

    #[test]
    fn unknown_sections_are_ignored() {
        let model = lower_model(
            &element(
                "<structure><name>Heart</name><notes>beats</notes>\
                 <variables><var><name>Rate</name><val>72</val></var></variables>\
                 </structure>",
            ),
            &Config::new(),
        )
        .expect("should lower");

        assert_eq!(model.variables().len(), 1);
        assert!(model.declares("Rate"));
    }
}
