//! Lowering of the `<variables>` section.

use hummod_ir::{VariableKind, VariableSpec};
use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::markup::Element;

/// Lowers each `var` or `parm` child of the section into a [`VariableSpec`].
///
/// A declaration without a `<val>` child has no value; it is expected to be
/// computed by a function or definition of the same name. Declarations
/// without a `<name>` are dropped.
pub fn lower_variables(section: &Element) -> IndexMap<String, VariableSpec> {
    let mut variables = IndexMap::new();

    for element in section.elements() {
        let Some(kind) = VariableKind::from_tag(element.name()) else {
            trace!(tag = element.name(), "skipping non-variable entry");
            continue;
        };

        let Some(name) = element.child("name").map(Element::text) else {
            warn!(
                offset = element.offset(),
                "ignoring {} declaration without a name",
                kind.tag()
            );
            continue;
        };

        let value = element.child("val").map(Element::text);

        if variables
            .insert(name.clone(), VariableSpec::new(kind, value))
            .is_some()
        {
            warn!(variable = %name, "duplicate variable declaration, keeping the last one");
        }
    }

    variables
}
