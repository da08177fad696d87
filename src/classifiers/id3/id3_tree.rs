use crate::classifiers::Classifier;
use crate::classifiers::id3::nodes::Node;
use crate::classifiers::id3::tree_builder::TreeBuilder;
use crate::classifiers::id3::unseen_value_policy::UnseenValuePolicy;
use crate::core::{Dataset, Id3Error, Record};
use log::info;

/// An ID3 decision tree classifier.
pub struct Id3Tree {
    tree_root: Option<Node>,
    label_attribute: Option<String>,
    builder: TreeBuilder,
    unseen_value_policy: UnseenValuePolicy,
    attributes: Option<Vec<String>>,
}

impl Default for Id3Tree {
    fn default() -> Self {
        Self::new(TreeBuilder::new(), UnseenValuePolicy::default())
    }
}

impl Id3Tree {
    pub fn new(builder: TreeBuilder, unseen_value_policy: UnseenValuePolicy) -> Self {
        Self {
            tree_root: None,
            label_attribute: None,
            builder,
            unseen_value_policy,
            attributes: None,
        }
    }

    /// Restricts splitting to `attributes` instead of every non-label
    /// attribute of the training data.
    pub fn with_attributes(mut self, attributes: Vec<String>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn root(&self) -> Option<&Node> {
        self.tree_root.as_ref()
    }

    pub fn label_attribute(&self) -> Option<&str> {
        self.label_attribute.as_deref()
    }

    pub fn unseen_value_policy(&self) -> UnseenValuePolicy {
        self.unseen_value_policy
    }

    pub fn set_unseen_value_policy(&mut self, policy: UnseenValuePolicy) {
        self.unseen_value_policy = policy;
    }

    pub fn depth(&self) -> usize {
        self.tree_root.as_ref().map_or(0, Node::depth)
    }

    pub fn num_leaves(&self) -> usize {
        self.tree_root.as_ref().map_or(0, Node::num_leaves)
    }

    pub fn num_decision_nodes(&self) -> usize {
        self.tree_root.as_ref().map_or(0, Node::num_decision_nodes)
    }

    pub fn render(&self) -> Result<String, Id3Error> {
        let root = self.tree_root.as_ref().ok_or(Id3Error::NotTrained)?;
        let label = self.label_attribute.as_deref().unwrap_or_default();
        Ok(root.render(label))
    }
}

impl Classifier for Id3Tree {
    fn train(&mut self, dataset: &Dataset) -> Result<(), Id3Error> {
        let attributes = match &self.attributes {
            Some(attributes) => attributes.clone(),
            None => dataset.candidate_attributes(),
        };

        let root = self.builder.build(dataset, &attributes)?;
        info!(
            "built tree over {} records: depth {}, {} leaves, {} decision nodes",
            dataset.len(),
            root.depth(),
            root.num_leaves(),
            root.num_decision_nodes()
        );

        self.tree_root = Some(root);
        self.label_attribute = Some(dataset.label_attribute().to_string());
        Ok(())
    }

    fn predict(&self, record: &Record) -> Result<String, Id3Error> {
        let root = self.tree_root.as_ref().ok_or(Id3Error::NotTrained)?;
        root.predict(record, self.unseen_value_policy)
            .map(str::to_string)
    }
}
