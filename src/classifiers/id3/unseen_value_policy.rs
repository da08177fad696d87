use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// What prediction does when a decision node has no branch for the value a
/// record carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum UnseenValuePolicy {
    /// Fail with `Id3Error::PredictionGap`.
    #[default]
    Fail,
    /// Answer with the majority label of the training partition that reached
    /// the node.
    MajorityClass,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_kebab_case() {
        assert_eq!(
            UnseenValuePolicy::from_str("majority-class").unwrap(),
            UnseenValuePolicy::MajorityClass
        );
        assert_eq!(UnseenValuePolicy::from_str("fail").unwrap(), UnseenValuePolicy::Fail);
        assert!(UnseenValuePolicy::from_str("guess").is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let shown = UnseenValuePolicy::MajorityClass.to_string();
        assert_eq!(shown, "majority-class");
        assert_eq!(
            UnseenValuePolicy::from_str(&shown).unwrap(),
            UnseenValuePolicy::MajorityClass
        );
    }
}
