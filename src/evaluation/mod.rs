mod classification_tally;
mod holdout_evaluator;
mod report;
mod splitter;

pub use classification_tally::{ClassCounts, ClassificationTally};
pub use holdout_evaluator::{HoldoutEvaluator, evaluate, evaluate_with_config};
pub use report::{EvaluationReport, TreeSummary};
pub use splitter::train_test_split;
