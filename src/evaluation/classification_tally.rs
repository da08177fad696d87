use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub support: u64,
    pub correct: u64,
    pub predicted: u64,
}

/// Running count of prediction outcomes.
///
/// Tracks overall hits and misses plus, per true label, how many records
/// carried it, how many of those were predicted correctly, and how many
/// records were predicted as that label.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassificationTally {
    correct: u64,
    incorrect: u64,
    per_class: BTreeMap<String, ClassCounts>,
}

impl ClassificationTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, true_label: &str, predicted_label: &str) {
        let hit = true_label == predicted_label;
        if hit {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }

        let truth = self.per_class.entry(true_label.to_string()).or_default();
        truth.support += 1;
        if hit {
            truth.correct += 1;
        }
        self.per_class
            .entry(predicted_label.to_string())
            .or_default()
            .predicted += 1;
    }

    pub fn correct(&self) -> u64 {
        self.correct
    }

    pub fn incorrect(&self) -> u64 {
        self.incorrect
    }

    pub fn total(&self) -> u64 {
        self.correct + self.incorrect
    }

    /// Percentage of correct predictions, `None` before any result.
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            None
        } else {
            Some(self.correct as f64 / total as f64 * 100.0)
        }
    }

    /// Percentage of records of `label` that were predicted as `label`.
    pub fn recall(&self, label: &str) -> Option<f64> {
        let counts = self.per_class.get(label)?;
        if counts.support == 0 {
            return None;
        }
        Some(counts.correct as f64 / counts.support as f64 * 100.0)
    }

    /// Percentage of records predicted as `label` that really were `label`.
    pub fn precision(&self, label: &str) -> Option<f64> {
        let counts = self.per_class.get(label)?;
        if counts.predicted == 0 {
            return None;
        }
        Some(counts.correct as f64 / counts.predicted as f64 * 100.0)
    }

    pub fn per_class(&self) -> &BTreeMap<String, ClassCounts> {
        &self.per_class
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_tally_has_no_accuracy() {
        let t = ClassificationTally::new();
        assert_eq!(t.total(), 0);
        assert!(t.accuracy().is_none());
        assert!(t.recall("yes").is_none());
    }

    #[test]
    fn counts_hits_and_misses() {
        let mut t = ClassificationTally::new();
        t.add_result("yes", "yes");
        t.add_result("yes", "no");
        t.add_result("no", "no");
        t.add_result("no", "no");

        assert_eq!(t.correct(), 3);
        assert_eq!(t.incorrect(), 1);
        assert!(approx(t.accuracy().unwrap(), 75.0));
        assert!(approx(t.recall("yes").unwrap(), 50.0));
        assert!(approx(t.recall("no").unwrap(), 100.0));
        assert!(approx(t.precision("no").unwrap(), 200.0 / 3.0));
        assert!(approx(t.precision("yes").unwrap(), 100.0));
    }

    #[test]
    fn label_only_ever_predicted_has_no_recall() {
        let mut t = ClassificationTally::new();
        t.add_result("yes", "maybe");
        assert!(t.recall("maybe").is_none());
        assert!(approx(t.precision("maybe").unwrap(), 0.0));
    }
}
