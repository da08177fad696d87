use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// How a leaf's label was derived. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
pub enum LeafOrigin {
    #[strum(to_string = "exact match")]
    Pure,
    #[strum(to_string = "majority vote")]
    MajorityVote,
    #[strum(to_string = "no examples")]
    EmptyPartition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafNode {
    label: String,
    origin: LeafOrigin,
}

impl LeafNode {
    pub fn new(label: impl Into<String>, origin: LeafOrigin) -> Self {
        Self {
            label: label.into(),
            origin,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn origin(&self) -> LeafOrigin {
        self.origin
    }
}
