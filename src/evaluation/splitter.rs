use crate::core::{Dataset, Id3Error};
use rand::Rng;
use rand::seq::SliceRandom;

/// Shuffles record indices once and cuts them into a training and a testing
/// dataset.
///
/// The training side gets `round(n * train_fraction)` records, clamped so
/// that both sides hold at least one record. Every record ends up in exactly
/// one side.
pub fn train_test_split<R: Rng + ?Sized>(
    dataset: &Dataset,
    train_fraction: f64,
    rng: &mut R,
) -> Result<(Dataset, Dataset), Id3Error> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(Id3Error::InvalidParameter(format!(
            "train fraction must lie strictly between 0 and 1, got {train_fraction}"
        )));
    }
    let n = dataset.len();
    if n < 2 {
        return Err(Id3Error::InsufficientData(format!(
            "need at least 2 records to split, got {n}"
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    let cut = ((n as f64) * train_fraction).round() as usize;
    let cut = cut.clamp(1, n - 1);
    let (train, test) = indices.split_at(cut);

    Ok((dataset.subset(train)?, dataset.subset(test)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Record;
    use crate::testing::fixtures::{play_tennis, record};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeSet;

    fn keys(ds: &Dataset) -> Vec<String> {
        ds.records().iter().map(Record::to_string).collect()
    }

    #[test]
    fn partitions_are_disjoint_and_exhaustive() {
        let ds = play_tennis();
        let mut rng = StdRng::seed_from_u64(7);
        let (train, test) = train_test_split(&ds, 0.5, &mut rng).unwrap();
        assert_eq!(train.len(), 7);
        assert_eq!(test.len(), 7);

        let train_keys: BTreeSet<String> = keys(&train).into_iter().collect();
        let test_keys: BTreeSet<String> = keys(&test).into_iter().collect();
        assert!(train_keys.is_disjoint(&test_keys));

        let all: BTreeSet<String> = train_keys.union(&test_keys).cloned().collect();
        let expected: BTreeSet<String> = keys(&ds).into_iter().collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn same_seed_gives_same_split() {
        let ds = play_tennis();
        let (a_train, a_test) = train_test_split(&ds, 0.7, &mut StdRng::seed_from_u64(42)).unwrap();
        let (b_train, b_test) = train_test_split(&ds, 0.7, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(keys(&a_train), keys(&b_train));
        assert_eq!(keys(&a_test), keys(&b_test));
        assert_eq!(a_train.len(), 10);
    }

    #[test]
    fn extreme_fractions_keep_both_sides_non_empty() {
        let ds = play_tennis();
        let mut rng = StdRng::seed_from_u64(1);
        let (train, test) = train_test_split(&ds, 0.01, &mut rng).unwrap();
        assert_eq!((train.len(), test.len()), (1, 13));
        let (train, test) = train_test_split(&ds, 0.99, &mut rng).unwrap();
        assert_eq!((train.len(), test.len()), (13, 1));

        let two = Dataset::new(
            vec![record(&[("class", "a")]), record(&[("class", "b")])],
            "class",
        )
        .unwrap();
        let (train, test) = train_test_split(&two, 0.5, &mut rng).unwrap();
        assert_eq!((train.len(), test.len()), (1, 1));
    }

    #[test]
    fn rejects_bad_fraction_and_tiny_datasets() {
        let ds = play_tennis();
        let mut rng = StdRng::seed_from_u64(1);
        for f in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                train_test_split(&ds, f, &mut rng),
                Err(Id3Error::InvalidParameter(_))
            ));
        }

        let one = Dataset::new(vec![record(&[("class", "a")])], "class").unwrap();
        assert!(matches!(
            train_test_split(&one, 0.5, &mut rng),
            Err(Id3Error::InsufficientData(_))
        ));
    }
}
