mod constant_classifier;
mod oracle_classifier;

pub use constant_classifier::ConstantClassifier;
pub use oracle_classifier::OracleClassifier;
