use crate::classifiers::id3::nodes::node::Node;
use crate::core::{Id3Error, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Internal node: tests one attribute and owns one child per branch value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionNode {
    attribute: String,
    default_label: String,
    children: BTreeMap<String, Node>,
}

impl DecisionNode {
    pub fn new(attribute: impl Into<String>, default_label: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            default_label: default_label.into(),
            children: BTreeMap::new(),
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Majority label of the training partition this node was built from.
    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    pub fn set_child(&mut self, value: impl Into<String>, child: Node) {
        self.children.insert(value.into(), child);
    }

    pub fn get_child(&self, value: &str) -> Option<&Node> {
        self.children.get(value)
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// The record's value for this node's attribute.
    pub fn branch_value<'r>(&self, record: &'r Record) -> Result<&'r str, Id3Error> {
        record.value(&self.attribute)
    }
}
