//! Lowering of the `<definitions>` section.

use hummod_ir::{DefinitionBlock, DefinitionNode};
use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::markup::Element;

/// The key under which a block's calls are serialized. Entries may not use it.
const CALLS_KEY: &str = "CALLS";

/// Lowers a `<definitions>` or `<block>` element into a [`DefinitionBlock`].
///
/// `def` children become expressions, `block` children recurse, and `call`
/// children are appended to the block's calls in source order.
pub fn lower_block(element: &Element) -> DefinitionBlock {
    let mut entries = IndexMap::new();
    let mut calls = Vec::new();

    for child in element.elements() {
        let entry = match child.name() {
            "def" => match (child.child("name"), child.child("val")) {
                (Some(name), Some(val)) => {
                    Some((name.text(), DefinitionNode::Expression(val.text())))
                }
                _ => {
                    warn!(offset = child.offset(), "ignoring def without both a name and a val");
                    None
                }
            },
            "block" => {
                if let Some(name) = child.child("name") {
                    Some((name.text(), DefinitionNode::Block(lower_block(child))))
                } else {
                    warn!(offset = child.offset(), "ignoring block without a name");
                    None
                }
            }
            "call" => {
                let call = child.text();
                if call.is_empty() {
                    warn!(offset = child.offset(), "ignoring empty call");
                } else {
                    calls.push(call);
                }
                None
            }
            // a block's own name
            "name" => None,
            other => {
                trace!(tag = other, "skipping unknown definition entry");
                None
            }
        };

        let Some((name, node)) = entry else {
            continue;
        };

        if name == CALLS_KEY {
            warn!("ignoring definition named {CALLS_KEY}");
            continue;
        }

        if entries.insert(name.clone(), node).is_some() {
            warn!(definition = %name, "duplicate definition, keeping the last one");
        }
    }

    DefinitionBlock::new(entries, calls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::element;

    #[test]
    fn defs_blocks_and_calls() {
        let section = element(
            "<definitions>\
               <def><name>Flow</name><val>Conductance</val></def>\
               <block><name>Parms</name>\
                 <def><name>Effect</name><val>Effect [ Area ]</val></def>\
                 <call>Heart.Pump</call>\
               </block>\
               <call>Lungs.Ventilate</call>\
             </definitions>",
        );

        let block = lower_block(&section);

        assert_eq!(
            block.get("Flow").and_then(DefinitionNode::as_expression),
            Some("Conductance")
        );
        assert_eq!(block.calls(), ["Lungs.Ventilate".to_string()]);

        let parms = block
            .get("Parms")
            .and_then(DefinitionNode::as_block)
            .expect("Parms should be a block");
        assert_eq!(
            parms.get("Effect").and_then(DefinitionNode::as_expression),
            Some("Effect [ Area ]")
        );
        assert_eq!(parms.calls(), ["Heart.Pump".to_string()]);
        assert!(parms.get("name").is_none());
    }

    #[test]
    fn call_order_is_preserved() {
        let section = element(
            "<definitions><block><name>Beat</name>\
               <call>Heart.Pump</call>\
               <call>Lungs.Ventilate</call>\
               <call>Heart.Pump</call>\
             </block></definitions>",
        );

        let block = lower_block(&section);
        let beat = block
            .get("Beat")
            .and_then(DefinitionNode::as_block)
            .expect("Beat should be a block");

        assert_eq!(beat.calls(), ["Heart.Pump", "Lungs.Ventilate", "Heart.Pump"]);
        assert!(beat.entries().is_empty());
    }

    #[test]
    fn incomplete_entries_are_skipped() {
        let section = element(
            "<definitions>\
               <def><name>NoVal</name></def>\
               <block><def><name>X</name><val>1</val></def></block>\
               <call>  </call>\
               <def><name>CALLS</name><val>oops</val></def>\
             </definitions>",
        );

        assert!(lower_block(&section).is_empty());
    }
}
