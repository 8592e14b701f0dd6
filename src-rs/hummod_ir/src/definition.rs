//! The tree of named definitions in a module.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node in the definitions tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefinitionNode {
    /// A raw expression, such as `Effect [ Area ]`
    Expression(String),
    /// A nested block of definitions
    Block(DefinitionBlock),
}

impl DefinitionNode {
    /// Returns the expression text if this node is an expression.
    #[must_use]
    pub fn as_expression(&self) -> Option<&str> {
        match self {
            Self::Expression(expression) => Some(expression),
            Self::Block(_) => None,
        }
    }

    /// Returns the block if this node is a block.
    #[must_use]
    pub const fn as_block(&self) -> Option<&DefinitionBlock> {
        match self {
            Self::Expression(_) => None,
            Self::Block(block) => Some(block),
        }
    }
}

/// A block of named definitions together with its ordered `CALLS` list.
///
/// The top-level `<definitions>` section of a module is itself a block. Each
/// call is a `Module.Definition` reference; calls are executed in the order
/// they were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionBlock {
    #[serde(flatten)]
    entries: IndexMap<String, DefinitionNode>,
    #[serde(rename = "CALLS", default, skip_serializing_if = "Vec::is_empty")]
    calls: Vec<String>,
}

impl DefinitionBlock {
    /// Creates a new block from its entries and calls.
    #[must_use]
    pub const fn new(entries: IndexMap<String, DefinitionNode>, calls: Vec<String>) -> Self {
        Self { entries, calls }
    }

    /// Returns the named entries of the block in declaration order.
    #[must_use]
    pub const fn entries(&self) -> &IndexMap<String, DefinitionNode> {
        &self.entries
    }

    /// Looks up an entry of this block by name (not recursively).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DefinitionNode> {
        self.entries.get(name)
    }

    /// Returns the `Module.Definition` calls in declaration order.
    #[must_use]
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Returns whether the block has neither entries nor calls.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.calls.is_empty()
    }

    /// Returns every expression in the tree, depth-first in declaration order,
    /// paired with the name it was declared under.
    #[must_use]
    pub fn expressions(&self) -> Vec<(&str, &str)> {
        fn collect<'a>(block: &'a DefinitionBlock, acc: &mut Vec<(&'a str, &'a str)>) {
            for (name, node) in &block.entries {
                match node {
                    DefinitionNode::Expression(expression) => acc.push((name, expression)),
                    DefinitionNode::Block(inner) => collect(inner, acc),
                }
            }
        }

        let mut expressions = Vec::new();
        collect(self, &mut expressions);
        expressions
    }
}
