mod info_gain_split_criterion;
mod split_criterion;

pub use info_gain_split_criterion::{
    InfoGainSplitCriterion, MERIT_TOLERANCE, class_distribution, entropy, information_gain,
};
pub use split_criterion::SplitCriterion;
