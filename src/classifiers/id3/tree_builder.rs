use crate::classifiers::id3::nodes::{DecisionNode, LeafNode, LeafOrigin, Node};
use crate::classifiers::id3::split_criteria::{
    MERIT_TOLERANCE, class_distribution, information_gain,
};
use crate::core::{Dataset, Id3Error, Record, partition_by};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strum_macros::{Display, EnumString};

/// Which values of the chosen attribute get a branch at a decision node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SplitValues {
    /// Values present in the partition being split.
    #[default]
    Observed,
    /// Values listed per attribute (plus any observed ones). Values with no
    /// records in the partition become `EmptyPartition` leaves.
    Domain(BTreeMap<String, Vec<String>>),
}

/// Configuration-level name for [`SplitValues`]; the domain itself is taken
/// from the full source dataset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SplitValuesKind {
    #[default]
    Observed,
    Domain,
}

/// Recursive ID3 induction.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    split_values: SplitValues,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_split_values(mut self, split_values: SplitValues) -> Self {
        self.split_values = split_values;
        self
    }

    pub fn build(&self, dataset: &Dataset, attributes: &[String]) -> Result<Node, Id3Error> {
        let records = dataset.record_refs();
        self.build_from_records(&records, dataset.label_attribute(), attributes)
    }

    pub fn build_from_records(
        &self,
        records: &[&Record],
        label_attribute: &str,
        attributes: &[String],
    ) -> Result<Node, Id3Error> {
        if records.is_empty() {
            return Err(Id3Error::InvalidInput(
                "cannot build a tree from zero records".into(),
            ));
        }
        if attributes.iter().any(|a| a == label_attribute) {
            return Err(Id3Error::InvalidInput(format!(
                "label attribute '{label_attribute}' cannot be a split candidate"
            )));
        }

        let attributes: BTreeSet<&str> = attributes.iter().map(String::as_str).collect();
        self.build_node(records, label_attribute, &attributes, 0)
    }

    fn build_node(
        &self,
        records: &[&Record],
        label_attribute: &str,
        attributes: &BTreeSet<&str>,
        depth: usize,
    ) -> Result<Node, Id3Error> {
        let counts = class_distribution(records, label_attribute)?;

        if counts.len() == 1 {
            let label = counts.keys().next().copied().unwrap_or_default();
            trace!("depth {depth}: pure leaf '{label}' over {} records", records.len());
            return Ok(Node::Leaf(LeafNode::new(label, LeafOrigin::Pure)));
        }

        let majority = majority_of(&counts);
        if attributes.is_empty() {
            trace!("depth {depth}: attributes exhausted, majority leaf '{majority}'");
            return Ok(Node::Leaf(LeafNode::new(majority, LeafOrigin::MajorityVote)));
        }

        let (best, gain) = self.best_attribute(records, label_attribute, attributes)?;
        debug!(
            "depth {depth}: split {} records on '{best}' (gain {gain:.4})",
            records.len()
        );

        let mut node = DecisionNode::new(best, majority);
        let remaining: BTreeSet<&str> = attributes.iter().copied().filter(|a| *a != best).collect();
        let groups = partition_by(records, best)?;

        for value in self.branch_values(best, &groups) {
            match groups.get(value.as_str()) {
                Some(subset) if !subset.is_empty() => {
                    let child = self.build_node(subset, label_attribute, &remaining, depth + 1)?;
                    node.set_child(value, child);
                }
                _ => {
                    trace!("depth {depth}: no records for {best}={value}");
                    node.set_child(
                        value,
                        Node::Leaf(LeafNode::new(majority, LeafOrigin::EmptyPartition)),
                    );
                }
            }
        }

        Ok(Node::Decision(node))
    }

    /// Highest-gain attribute. Gains within `MERIT_TOLERANCE` tie, and ties go
    /// to the attribute that sorts first.
    fn best_attribute<'a>(
        &self,
        records: &[&Record],
        label_attribute: &str,
        attributes: &BTreeSet<&'a str>,
    ) -> Result<(&'a str, f64), Id3Error> {
        let mut best: Option<(&'a str, f64)> = None;
        for &attribute in attributes {
            let gain = information_gain(records, attribute, label_attribute)?;
            trace!("  gain({attribute}) = {gain:.6}");
            match best {
                Some((_, best_gain)) if gain <= best_gain + MERIT_TOLERANCE => {}
                _ => best = Some((attribute, gain)),
            }
        }
        best.ok_or_else(|| Id3Error::InvalidInput("no candidate attributes".into()))
    }

    fn branch_values(
        &self,
        attribute: &str,
        groups: &BTreeMap<&str, Vec<&Record>>,
    ) -> BTreeSet<String> {
        let mut values: BTreeSet<String> = groups.keys().map(|v| v.to_string()).collect();
        if let SplitValues::Domain(domains) = &self.split_values {
            if let Some(domain) = domains.get(attribute) {
                values.extend(domain.iter().cloned());
            }
        }
        values
    }
}

/// Most frequent label; on equal counts the label that sorts first wins.
pub fn majority_label<'a>(
    records: &[&'a Record],
    label_attribute: &str,
) -> Result<&'a str, Id3Error> {
    if records.is_empty() {
        return Err(Id3Error::InvalidInput(
            "majority label of an empty record set is undefined".into(),
        ));
    }
    let counts = class_distribution(records, label_attribute)?;
    Ok(majority_of(&counts))
}

fn majority_of<'a>(counts: &BTreeMap<&'a str, usize>) -> &'a str {
    let mut best: Option<(&'a str, usize)> = None;
    for (&label, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((label, count)),
        }
    }
    best.map(|(label, _)| label).unwrap_or_default()
}
