use crate::classifiers::Classifier;
use crate::config::EvaluationConfig;
use crate::core::{Dataset, Id3Error};
use crate::evaluation::splitter::train_test_split;
use crate::evaluation::{ClassificationTally, EvaluationReport, TreeSummary};
use cpu_time::ThreadTime;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Train on one shuffled share of a dataset, test on the rest.
#[derive(Debug, Clone, Copy)]
pub struct HoldoutEvaluator {
    train_fraction: f64,
    seed: Option<u64>,
}

impl HoldoutEvaluator {
    pub fn new(train_fraction: f64, seed: Option<u64>) -> Result<Self, Id3Error> {
        if !(train_fraction > 0.0 && train_fraction < 1.0) {
            return Err(Id3Error::InvalidParameter(format!(
                "train fraction must lie strictly between 0 and 1, got {train_fraction}"
            )));
        }
        Ok(Self {
            train_fraction,
            seed,
        })
    }

    pub fn split(&self, dataset: &Dataset) -> Result<(Dataset, Dataset), Id3Error> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        train_test_split(dataset, self.train_fraction, &mut rng)
    }

    pub fn run<C: Classifier + ?Sized>(
        &self,
        classifier: &mut C,
        dataset: &Dataset,
    ) -> Result<EvaluationReport, Id3Error> {
        let (training, testing) = self.split(dataset)?;
        info!(
            "split {} records into {} training / {} testing",
            dataset.len(),
            training.len(),
            testing.len()
        );
        self.run_on_split(classifier, &training, &testing)
    }

    pub fn run_on_split<C: Classifier + ?Sized>(
        &self,
        classifier: &mut C,
        training: &Dataset,
        testing: &Dataset,
    ) -> Result<EvaluationReport, Id3Error> {
        if testing.is_empty() {
            return Err(Id3Error::InsufficientData(
                "testing partition is empty, accuracy is undefined".into(),
            ));
        }

        let start = ThreadTime::now();
        classifier.train(training)?;
        let build_seconds = start.elapsed().as_secs_f64();
        info!("training finished in {build_seconds:.6}s");

        let training_tally = tally(classifier, training)?;
        let test = tally(classifier, testing)?;
        debug!(
            "testing: {} correct, {} incorrect",
            test.correct(),
            test.incorrect()
        );

        let accuracy = test.accuracy().ok_or_else(|| {
            Id3Error::InsufficientData("no testing records were classified".into())
        })?;
        let training_accuracy = training_tally.accuracy().unwrap_or(f64::NAN);
        info!("{accuracy:.2}% accuracy");

        Ok(EvaluationReport {
            train_size: training.len(),
            test_size: testing.len(),
            accuracy,
            training_accuracy,
            build_seconds,
            test,
            tree: None,
        })
    }
}

fn tally<C: Classifier + ?Sized>(
    classifier: &C,
    dataset: &Dataset,
) -> Result<ClassificationTally, Id3Error> {
    let mut tally = ClassificationTally::new();
    for record in dataset.records() {
        let predicted = classifier.predict(record)?;
        tally.add_result(dataset.label_of(record)?, &predicted);
    }
    Ok(tally)
}

/// Holdout accuracy of an ID3 tree with default settings and an unseeded
/// shuffle.
pub fn evaluate(dataset: &Dataset, train_fraction: f64) -> Result<EvaluationReport, Id3Error> {
    let config = EvaluationConfig {
        train_fraction,
        ..EvaluationConfig::default()
    };
    evaluate_with_config(dataset, &config)
}

pub fn evaluate_with_config(
    dataset: &Dataset,
    config: &EvaluationConfig,
) -> Result<EvaluationReport, Id3Error> {
    config.validate()?;
    let evaluator = HoldoutEvaluator::new(config.train_fraction, config.seed)?;
    let mut tree = config.build_classifier(dataset);
    let report = evaluator.run(&mut tree, dataset)?;
    Ok(report.with_tree(TreeSummary::of(&tree)))
}
