use crate::core::{Dataset, Id3Error, Record};

pub trait Classifier {
    /// Fits the model to `dataset`, replacing anything learned before.
    fn train(&mut self, dataset: &Dataset) -> Result<(), Id3Error>;
    fn predict(&self, record: &Record) -> Result<String, Id3Error>;
}
