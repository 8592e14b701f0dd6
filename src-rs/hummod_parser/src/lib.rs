//! Source compiler for HumMod module markup.
//!
//! A module source is a loosely structured markup file. Only its
//! `<structure>…</structure>` region is compiled, into a [`ParsedModel`]
//! holding the module's variables, functions, and definitions. The crate also
//! provides [`parse_call_expression`], which recognizes the `Ident [ args ]`
//! form used by definition expressions.

use hummod_ir::ParsedModel;
use tracing::{debug, trace};

mod call;
mod config;
mod definition;
pub mod error;
mod function;
mod markup;
mod model;
mod structure;
mod util;
mod variable;

pub use call::parse_call_expression;
pub use config::Config;
pub use error::CompileError;
pub use structure::structure_region;

use error::ParserError;
use structure::EscapedText;
use util::InputSpan;

/// Compiles a module source into a [`ParsedModel`].
///
/// Everything outside the first `<structure>…</structure>` region is ignored.
/// Bare `&` characters inside the region are escaped before parsing.
///
/// # Errors
///
/// Returns [`CompileError::StructureNotFound`] if the source has no
/// `<structure>` region, and [`CompileError::Parse`] if the region is not
/// well-formed. Parse error offsets refer to `source`.
pub fn compile(source: &str, config: Option<Config>) -> Result<ParsedModel, CompileError> {
    let config = config.unwrap_or_default();

    let region = structure_region(source).ok_or(CompileError::StructureNotFound)?;
    let region_start = region.start;

    let escaped = EscapedText::escape(&source[region]);
    if escaped.escape_count() > 0 {
        trace!(count = escaped.escape_count(), "escaped bare ampersands");
    }

    let to_source = |error: ParserError| {
        ParserError::new(
            region_start + escaped.original_offset(error.error_offset),
            error.reason,
        )
    };

    let root = match markup::parse_document(InputSpan::new(escaped.as_str())) {
        Ok((_rest, root)) => root,
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => return Err(to_source(e).into()),
        Err(nom::Err::Incomplete(_needed)) => unreachable!(
            "This should never happen because we use `complete` combinators rather than `stream` combinators"
        ),
    };

    let model = model::lower_model(&root, &config).map_err(to_source)?;

    debug!(
        variables = model.variables().len(),
        functions = model.functions().len(),
        "compiled module source"
    );

    Ok(model)
}

#[cfg(test)]
mod tests {
    use hummod_ir::{Curve, CurvePoint, DefinitionNode, FunctionSpec, VariableKind};
    use hummod_shared::error::AsHummodError;

    use super::*;
    use crate::error::reason::ParserErrorReason;

    const VALVE: &str = r"<?xml version='1.0'?>
<!-- Valve.DES -->
<root>
<structure><name>Valve</name>
  <variables>
    <var><name>Area</name></var>
    <var><name>Effect</name></var>
    <parm><name>Conductance</name><val>0.5</val></parm>
  </variables>
  <functions>
    <curve><name>Effect</name>
      <point><x>0.0</x><y>1.0</y><slope>0.0</slope></point>
      <point><x>3.3</x><y>0.0</y><slope>0.0</slope></point>
    </curve>
  </functions>
  <definitions>
    <def><name>Flow</name><val>Conductance</val></def>
    <block><name>Parms</name>
      <def><name>Effect</name><val>Effect [ Area ]</val></def>
    </block>
  </definitions>
</structure>
</root>";

    #[test]
    fn compile_valve() {
        let model = compile(VALVE, None).expect("should compile");

        let names: Vec<&str> = model.variables().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Area", "Effect", "Conductance"]);
        assert_eq!(
            model.variable("Conductance").map(|v| (v.kind(), v.value())),
            Some((VariableKind::Parm, Some("0.5")))
        );
        assert_eq!(model.variable("Area").and_then(|v| v.value()), None);

        assert_eq!(
            model.function("Effect"),
            Some(&FunctionSpec::Curve(Curve::new(
                CurvePoint::new(0.0, 1.0, 0.0),
                CurvePoint::new(3.3, 0.0, 0.0),
            )))
        );

        let parms = model
            .definition("Parms")
            .and_then(DefinitionNode::as_block)
            .expect("Parms should be a block");
        assert_eq!(
            parms.get("Effect").and_then(DefinitionNode::as_expression),
            Some("Effect [ Area ]")
        );
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let model = compile("<structure><name>Empty</name></structure>", None)
            .expect("should compile");

        assert_eq!(model, ParsedModel::default());
    }

    #[test]
    fn missing_structure() {
        let error = compile("<root><name>Heart</name></root>", None).expect_err("should fail");
        assert_eq!(error, CompileError::StructureNotFound);
    }

    #[test]
    fn bare_ampersands_are_tolerated() {
        let source = "<structure><definitions>\
            <def><name>Both</name><val>a & b &amp; c &#38; d</val></def>\
            </definitions></structure>";

        let model = compile(source, None).expect("should compile");

        assert_eq!(
            model.definition("Both").and_then(DefinitionNode::as_expression),
            Some("a & b & c & d")
        );
    }

    #[test]
    fn error_offsets_refer_to_the_original_source() {
        let source = "junk & more\n<structure><variables>\n\
            <var><name>A & B</name></var>\n\
            <var><name>C</nam></var>\n\
            </variables></structure>";

        let error = compile(source, None).expect_err("should fail");

        let CompileError::Parse(parse_error) = &error else {
            panic!("expected a parse error, got {error:?}");
        };
        assert!(matches!(
            parse_error.reason,
            ParserErrorReason::MismatchedEndTag { .. }
        ));
        assert_eq!(
            parse_error.error_offset,
            source.find("</nam>").expect("fixture")
        );

        let location = error
            .error_location(source)
            .expect("parse errors have a location");
        assert_eq!(location.line(), 4);
        assert_eq!(location.column(), 13);
    }

    #[test]
    fn strict_curves() {
        let source = "<structure><functions>\
            <curve><name>Bad</name><point><x>0</x><y>0</y><slope>0</slope></point></curve>\
            </functions></structure>";

        assert!(compile(source, None).is_ok());

        let error = compile(source, Some(Config::new().with_strict_curves(true)))
            .expect_err("should fail");
        assert_eq!(
            error,
            CompileError::Parse(ParserError::new(
                source.find("<curve>").expect("fixture"),
                ParserErrorReason::MalformedCurve {
                    name: "Bad".to_string()
                },
            ))
        );
    }

    #[test]
    fn compiled_model_with_infinite_point_serializes() {
        let source = "<structure><functions>\
            <curve><name>Wild</name>\
              <point><x>inf</x><y>0</y><slope>0</slope></point>\
              <point><x>1</x><y>1</y><slope>0</slope></point>\
            </curve>\
            </functions></structure>";

        let model = compile(source, None).expect("should compile");
        let json = model.to_json().expect("should serialize");

        assert_eq!(
            ParsedModel::from_json(&json).expect("should deserialize"),
            model
        );
    }
}
