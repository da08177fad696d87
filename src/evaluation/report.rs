use crate::classifiers::id3::Id3Tree;
use crate::evaluation::ClassificationTally;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeSummary {
    pub depth: usize,
    pub leaves: usize,
    pub decision_nodes: usize,
}

impl TreeSummary {
    pub fn of(tree: &Id3Tree) -> Self {
        Self {
            depth: tree.depth(),
            leaves: tree.num_leaves(),
            decision_nodes: tree.num_decision_nodes(),
        }
    }
}

/// Outcome of one holdout run.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub train_size: usize,
    pub test_size: usize,
    /// Percentage of testing records predicted correctly.
    pub accuracy: f64,
    /// Percentage of training records the model reproduces.
    pub training_accuracy: f64,
    pub build_seconds: f64,
    pub test: ClassificationTally,
    pub tree: Option<TreeSummary>,
}

impl EvaluationReport {
    #[inline]
    fn fmtv(v: f64) -> String {
        if v.is_nan() {
            "NaN".into()
        } else {
            format!("{:.2}", v)
        }
    }

    pub fn with_tree(mut self, tree: TreeSummary) -> Self {
        self.tree = Some(tree);
        self
    }
}

impl Display for EvaluationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(
            f,
            "train={}, test={}, correct={}, incorrect={}",
            self.train_size,
            self.test_size,
            self.test.correct(),
            self.test.incorrect()
        )?;
        writeln!(
            f,
            "accuracy={}%, training_accuracy={}%, build_t={:.6}s",
            Self::fmtv(self.accuracy),
            Self::fmtv(self.training_accuracy),
            self.build_seconds
        )?;
        if let Some(tree) = &self.tree {
            writeln!(
                f,
                "tree: depth={}, leaves={}, decision_nodes={}",
                tree.depth, tree.leaves, tree.decision_nodes
            )?;
        }
        for (label, counts) in self.test.per_class() {
            let recall = self.test.recall(label).unwrap_or(f64::NAN);
            let precision = self.test.precision(label).unwrap_or(f64::NAN);
            writeln!(
                f,
                "  {label}: support={}, predicted={}, recall={}%, precision={}%",
                counts.support,
                counts.predicted,
                Self::fmtv(recall),
                Self::fmtv(precision)
            )?;
        }
        Ok(())
    }
}
