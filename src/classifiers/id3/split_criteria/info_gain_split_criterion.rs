use crate::classifiers::id3::split_criteria::split_criterion::SplitCriterion;
use crate::core::{Id3Error, Record, partition_by};
use std::collections::BTreeMap;

/// Merits closer than this are equal. Summing branch entropies in a different
/// order moves the result by a few ulps.
pub const MERIT_TOLERANCE: f64 = 1e-12;

/// Entropy-based split merit, as used by ID3.
#[derive(Clone, Copy, Debug, Default)]
pub struct InfoGainSplitCriterion {}

impl InfoGainSplitCriterion {
    pub fn new() -> Self {
        Self {}
    }

    /// Shannon entropy (bits) of a class-count distribution. Zero counts
    /// contribute nothing.
    pub fn compute_entropy(&self, distribution: &[f64]) -> f64 {
        let total: f64 = distribution.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        let mut entropy = 0.0;
        for &count in distribution {
            if count > 0.0 {
                let p = count / total;
                entropy -= p * p.log2();
            }
        }
        entropy
    }
}

impl SplitCriterion for InfoGainSplitCriterion {
    fn get_merit_of_split(
        &self,
        pre_split_distribution: &[f64],
        post_split_dists: &[Vec<f64>],
    ) -> f64 {
        let total: f64 = pre_split_distribution.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }

        let mut remainder = 0.0;
        for dist in post_split_dists {
            let weight: f64 = dist.iter().sum();
            if weight > 0.0 {
                remainder += (weight / total) * self.compute_entropy(dist);
            }
        }

        let merit = self.compute_entropy(pre_split_distribution) - remainder;
        if merit < MERIT_TOLERANCE { 0.0 } else { merit }
    }
}

/// Label value to number of records carrying it.
pub fn class_distribution<'a>(
    records: &[&'a Record],
    label_attribute: &str,
) -> Result<BTreeMap<&'a str, usize>, Id3Error> {
    let mut counts = BTreeMap::new();
    for &record in records {
        *counts.entry(record.value(label_attribute)?).or_insert(0) += 1;
    }
    Ok(counts)
}

pub fn entropy(records: &[&Record], label_attribute: &str) -> Result<f64, Id3Error> {
    if records.is_empty() {
        return Err(Id3Error::InvalidInput(
            "entropy of an empty record set is undefined".into(),
        ));
    }
    let counts = class_distribution(records, label_attribute)?;
    let dist: Vec<f64> = counts.values().map(|&c| c as f64).collect();
    Ok(InfoGainSplitCriterion::new().compute_entropy(&dist))
}

pub fn information_gain(
    records: &[&Record],
    attribute: &str,
    label_attribute: &str,
) -> Result<f64, Id3Error> {
    information_gain_with(
        &InfoGainSplitCriterion::new(),
        records,
        attribute,
        label_attribute,
    )
}

fn information_gain_with(
    criterion: &dyn SplitCriterion,
    records: &[&Record],
    attribute: &str,
    label_attribute: &str,
) -> Result<f64, Id3Error> {
    if records.is_empty() {
        return Err(Id3Error::InvalidInput(
            "information gain of an empty record set is undefined".into(),
        ));
    }

    let pre_counts = class_distribution(records, label_attribute)?;
    let labels: Vec<&str> = pre_counts.keys().copied().collect();
    let pre: Vec<f64> = pre_counts.values().map(|&c| c as f64).collect();

    let groups = partition_by(records, attribute)?;
    let mut post = Vec::with_capacity(groups.len());
    for group in groups.values() {
        let counts = class_distribution(group, label_attribute)?;
        post.push(
            labels
                .iter()
                .map(|l| counts.get(l).copied().unwrap_or(0) as f64)
                .collect::<Vec<f64>>(),
        );
    }

    Ok(criterion.get_merit_of_split(&pre, &post))
}
