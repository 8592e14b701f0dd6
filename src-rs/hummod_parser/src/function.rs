//! Lowering of the `<functions>` section.

use hummod_ir::{Curve, CurvePoint, FunctionSpec};
use indexmap::IndexMap;
use tracing::warn;

use crate::{
    config::Config,
    error::{ParserError, reason::ParserErrorReason},
    markup::Element,
};

/// Lowers each named child of the section into a [`FunctionSpec`].
///
/// A `curve` with exactly two points, each carrying numeric `x`, `y`, and
/// `slope` children, becomes [`FunctionSpec::Curve`]. Anything else is kept
/// as [`FunctionSpec::Unsupported`], unless [`Config::strict_curves`] is set
/// and the offending entry is a curve.
pub fn lower_functions(
    section: &Element,
    config: &Config,
) -> Result<IndexMap<String, FunctionSpec>, ParserError> {
    let mut functions = IndexMap::new();

    for element in section.elements() {
        let Some(name) = element.child("name").map(Element::text) else {
            warn!(
                tag = element.name(),
                offset = element.offset(),
                "ignoring function declaration without a name"
            );
            continue;
        };

        let spec = if element.name() == "curve" {
            match curve(element) {
                Some(curve) => FunctionSpec::Curve(curve),
                None if config.strict_curves => {
                    return Err(ParserError::new(
                        element.offset(),
                        ParserErrorReason::MalformedCurve { name },
                    ));
                }
                None => {
                    warn!(function = %name, "curve does not have two complete points, keeping it unevaluated");
                    unsupported(element)
                }
            }
        } else {
            unsupported(element)
        };

        if functions.insert(name.clone(), spec).is_some() {
            warn!(function = %name, "duplicate function declaration, keeping the last one");
        }
    }

    Ok(functions)
}

fn curve(element: &Element) -> Option<Curve> {
    let points = element
        .children_named("point")
        .map(curve_point)
        .collect::<Option<Vec<_>>>()?;

    let [p1, p2] = <[CurvePoint; 2]>::try_from(points).ok()?;
    Some(Curve::new(p1, p2))
}

fn curve_point(point: &Element) -> Option<CurvePoint> {
    let number = |field: &str| {
        point
            .child(field)?
            .text()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
    };

    Some(CurvePoint::new(number("x")?, number("y")?, number("slope")?))
}

fn unsupported(element: &Element) -> FunctionSpec {
    let body = element
        .elements()
        .filter(|child| child.name() != "name")
        .map(Element::deep_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    FunctionSpec::Unsupported {
        kind: element.name().to_string(),
        body,
    }
}
