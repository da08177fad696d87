use crate::classifiers::id3::UnseenValuePolicy;
use crate::classifiers::id3::nodes::{DecisionNode, FoundNode, LeafNode};
use crate::core::{Id3Error, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Write};

/// A decision tree. Children are owned by their parent; there is no sharing
/// and no back-reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Node {
    Leaf(LeafNode),
    Decision(DecisionNode),
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Walks `record` down the tree until it reaches a leaf or a decision
    /// node with no branch for the record's value.
    pub fn filter_record_to_leaf<'a>(
        &'a self,
        record: &'a Record,
    ) -> Result<FoundNode<'a>, Id3Error> {
        let mut current = self;
        loop {
            match current {
                Node::Leaf(leaf) => return Ok(FoundNode::Leaf(leaf)),
                Node::Decision(decision) => {
                    let value = decision.branch_value(record)?;
                    match decision.get_child(value) {
                        Some(child) => current = child,
                        None => {
                            return Ok(FoundNode::Unrouted {
                                parent: decision,
                                value,
                            });
                        }
                    }
                }
            }
        }
    }

    pub fn predict<'a>(
        &'a self,
        record: &'a Record,
        policy: UnseenValuePolicy,
    ) -> Result<&'a str, Id3Error> {
        match self.filter_record_to_leaf(record)? {
            FoundNode::Leaf(leaf) => Ok(leaf.label()),
            FoundNode::Unrouted { parent, value } => match policy {
                UnseenValuePolicy::MajorityClass => Ok(parent.default_label()),
                UnseenValuePolicy::Fail => Err(Id3Error::PredictionGap {
                    attribute: parent.attribute().to_string(),
                    value: value.to_string(),
                }),
            },
        }
    }

    /// Number of decision nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Decision(d) => 1 + d.children().map(|(_, c)| c.depth()).max().unwrap_or(0),
        }
    }

    pub fn num_leaves(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Decision(d) => d.children().map(|(_, c)| c.num_leaves()).sum(),
        }
    }

    pub fn num_decision_nodes(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Decision(d) => 1 + d.children().map(|(_, c)| c.num_decision_nodes()).sum::<usize>(),
        }
    }

    pub fn leaf_labels(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_leaf_labels(&mut out);
        out
    }

    fn collect_leaf_labels<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Node::Leaf(leaf) => {
                out.insert(leaf.label());
            }
            Node::Decision(d) => {
                for (_, child) in d.children() {
                    child.collect_leaf_labels(out);
                }
            }
        }
    }

    /// Indented text form; leaves are shown as `label_attribute=label`.
    pub fn render(&self, label_attribute: &str) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_tree(&mut out, 0, Some(label_attribute));
        out
    }

    fn write_tree<W: Write>(
        &self,
        out: &mut W,
        indentation: usize,
        label_attribute: Option<&str>,
    ) -> fmt::Result {
        let pad = "\t".repeat(indentation);
        match self {
            Node::Leaf(leaf) => match label_attribute {
                Some(name) => writeln!(out, "{pad}{name}={} ({})", leaf.label(), leaf.origin()),
                None => writeln!(out, "{pad}{} ({})", leaf.label(), leaf.origin()),
            },
            Node::Decision(d) => {
                writeln!(out, "{pad}What is the {}?", d.attribute())?;
                for (value, child) in d.children() {
                    writeln!(out, "{pad}\t{value}")?;
                    child.write_tree(out, indentation + 2, label_attribute)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::id3::nodes::LeafOrigin;
    use crate::testing::fixtures::record;

    fn leaf(label: &str) -> Node {
        Node::Leaf(LeafNode::new(label, LeafOrigin::Pure))
    }

    // outlook -> { overcast: yes, sunny: humidity -> { high: no, normal: yes } }
    fn small_tree() -> Node {
        let mut humidity = DecisionNode::new("humidity", "no");
        humidity.set_child("high", leaf("no"));
        humidity.set_child("normal", leaf("yes"));

        let mut root = DecisionNode::new("outlook", "yes");
        root.set_child("overcast", leaf("yes"));
        root.set_child("sunny", Node::Decision(humidity));
        Node::Decision(root)
    }

    #[test]
    fn predict_follows_branches() {
        let tree = small_tree();
        let r = record(&[("outlook", "sunny"), ("humidity", "normal")]);
        assert_eq!(tree.predict(&r, UnseenValuePolicy::Fail).unwrap(), "yes");
        let r = record(&[("outlook", "sunny"), ("humidity", "high")]);
        assert_eq!(tree.predict(&r, UnseenValuePolicy::Fail).unwrap(), "no");
        let r = record(&[("outlook", "overcast")]);
        assert_eq!(tree.predict(&r, UnseenValuePolicy::Fail).unwrap(), "yes");
    }

    #[test]
    fn unseen_value_fails_with_prediction_gap() {
        let tree = small_tree();
        let r = record(&[("outlook", "sunny"), ("humidity", "damp")]);
        match tree.predict(&r, UnseenValuePolicy::Fail).unwrap_err() {
            Id3Error::PredictionGap { attribute, value } => {
                assert_eq!(attribute, "humidity");
                assert_eq!(value, "damp");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unseen_value_falls_back_to_node_default() {
        let tree = small_tree();
        let r = record(&[("outlook", "sunny"), ("humidity", "damp")]);
        assert_eq!(
            tree.predict(&r, UnseenValuePolicy::MajorityClass).unwrap(),
            "no"
        );
        let r = record(&[("outlook", "rain")]);
        assert_eq!(
            tree.predict(&r, UnseenValuePolicy::MajorityClass).unwrap(),
            "yes"
        );
    }

    #[test]
    fn missing_attribute_is_reported_not_routed() {
        let tree = small_tree();
        let r = record(&[("humidity", "high")]);
        assert!(matches!(
            tree.predict(&r, UnseenValuePolicy::MajorityClass),
            Err(Id3Error::MissingAttribute { attribute }) if attribute == "outlook"
        ));
    }

    #[test]
    fn filter_record_reports_where_it_stopped() {
        let tree = small_tree();
        let r = record(&[("outlook", "rain")]);
        match tree.filter_record_to_leaf(&r).unwrap() {
            FoundNode::Unrouted { parent, value } => {
                assert_eq!(parent.attribute(), "outlook");
                assert_eq!(value, "rain");
            }
            FoundNode::Leaf(_) => panic!("expected to stop at the root"),
        }
    }

    #[test]
    fn statistics() {
        let tree = small_tree();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.num_leaves(), 3);
        assert_eq!(tree.num_decision_nodes(), 2);
        assert_eq!(tree.leaf_labels().into_iter().collect::<Vec<_>>(), vec!["no", "yes"]);

        let single = leaf("yes");
        assert_eq!(single.depth(), 0);
        assert_eq!(single.num_leaves(), 1);
        assert_eq!(single.num_decision_nodes(), 0);
    }

    #[test]
    fn render_indents_with_tabs() {
        let tree = small_tree();
        let expected = "\
What is the outlook?
\tovercast
\t\tplay=yes (exact match)
\tsunny
\t\tWhat is the humidity?
\t\t\thigh
\t\t\t\tplay=no (exact match)
\t\t\tnormal
\t\t\t\tplay=yes (exact match)
";
        assert_eq!(tree.render("play"), expected);
        assert!(tree.to_string().contains("\t\tyes (exact match)\n"));
    }

    #[test]
    fn serializes_to_json_and_back() {
        let tree = small_tree();
        let json = serde_json::to_string(&tree).unwrap();
        assert!(json.contains("\"decision\""));
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }
}
