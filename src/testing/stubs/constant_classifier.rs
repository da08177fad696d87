use crate::classifiers::Classifier;
use crate::core::{Dataset, Id3Error, Record};

/// Predicts the same label for every record.
pub struct ConstantClassifier {
    label: String,
}

impl ConstantClassifier {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Classifier for ConstantClassifier {
    fn train(&mut self, _dataset: &Dataset) -> Result<(), Id3Error> {
        Ok(())
    }

    fn predict(&self, _record: &Record) -> Result<String, Id3Error> {
        Ok(self.label.clone())
    }
}
