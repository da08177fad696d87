/// Scores a candidate split from class-count distributions.
///
/// `pre_split_distribution` holds the label counts of the partition being
/// split, `post_split_dists` one distribution per branch.
pub trait SplitCriterion {
    fn get_merit_of_split(
        &self,
        pre_split_distribution: &[f64],
        post_split_dists: &[Vec<f64>],
    ) -> f64;
}
