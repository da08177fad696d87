use crate::classifiers::id3::{
    Id3Tree, SplitValues, SplitValuesKind, TreeBuilder, UnseenValuePolicy,
};
use crate::config::overrides::{KeyValue, apply_overrides};
use crate::core::{Dataset, Id3Error};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Everything a holdout run needs besides the data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Label column; `None` means the first column of the source.
    pub label_attribute: Option<String>,
    pub train_fraction: f64,
    /// Seed for the train/test shuffle; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub unseen_value_policy: UnseenValuePolicy,
    pub split_values: SplitValuesKind,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            label_attribute: None,
            train_fraction: 0.5,
            seed: None,
            unseen_value_policy: UnseenValuePolicy::default(),
            split_values: SplitValuesKind::default(),
        }
    }
}

impl EvaluationConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, Id3Error> {
        let reader = BufReader::new(File::open(path)?);
        serde_json::from_reader(reader).map_err(|e| {
            Id3Error::InvalidParameter(format!("invalid config {}: {e}", path.display()))
        })
    }

    /// Applies dotted `key=value` overrides on top of this configuration.
    pub fn with_overrides(self, overrides: &[KeyValue]) -> Result<Self, Id3Error> {
        if overrides.is_empty() {
            return Ok(self);
        }
        let mut value = serde_json::to_value(&self)
            .map_err(|e| Id3Error::InvalidParameter(e.to_string()))?;
        apply_overrides(&mut value, overrides)?;
        serde_json::from_value(value).map_err(|e| Id3Error::InvalidParameter(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), Id3Error> {
        if !(self.train_fraction > 0.0 && self.train_fraction < 1.0) {
            return Err(Id3Error::InvalidParameter(format!(
                "train_fraction must lie strictly between 0 and 1, got {}",
                self.train_fraction
            )));
        }
        if let Some(label) = &self.label_attribute {
            if label.trim().is_empty() {
                return Err(Id3Error::InvalidParameter(
                    "label_attribute cannot be blank".into(),
                ));
            }
        }
        Ok(())
    }

    /// An untrained classifier configured for this run. `source` supplies the
    /// attribute domains when branches are made for every known value.
    pub fn build_classifier(&self, source: &Dataset) -> Id3Tree {
        let split_values = match self.split_values {
            SplitValuesKind::Observed => SplitValues::Observed,
            SplitValuesKind::Domain => SplitValues::Domain(source.attribute_domains()),
        };
        Id3Tree::new(
            TreeBuilder::new().with_split_values(split_values),
            self.unseen_value_policy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_key_value;
    use crate::testing::fixtures::play_tennis;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        let c = EvaluationConfig::default();
        assert_eq!(c.train_fraction, 0.5);
        assert_eq!(c.unseen_value_policy, UnseenValuePolicy::Fail);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn overrides_replace_fields() {
        let overrides = vec![
            parse_key_value("train_fraction=0.8").unwrap(),
            parse_key_value("seed=9").unwrap(),
            parse_key_value("unseen_value_policy=majority-class").unwrap(),
            parse_key_value("split_values=domain").unwrap(),
            parse_key_value("label_attribute=play-tennis").unwrap(),
        ];
        let c = EvaluationConfig::default().with_overrides(&overrides).unwrap();
        assert_eq!(c.train_fraction, 0.8);
        assert_eq!(c.seed, Some(9));
        assert_eq!(c.unseen_value_policy, UnseenValuePolicy::MajorityClass);
        assert_eq!(c.split_values, SplitValuesKind::Domain);
        assert_eq!(c.label_attribute.as_deref(), Some("play-tennis"));
    }

    #[test]
    fn override_with_wrong_type_is_invalid_parameter() {
        let overrides = vec![parse_key_value("seed=soon").unwrap()];
        assert!(matches!(
            EvaluationConfig::default().with_overrides(&overrides),
            Err(Id3Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn misspelled_override_key_is_rejected() {
        let overrides = vec![parse_key_value("trian_fraction=0.9").unwrap()];
        assert!(matches!(
            EvaluationConfig::default().with_overrides(&overrides),
            Err(Id3Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn misspelled_file_key_is_rejected() {
        let mut f = NamedTempFile::new().expect("tempfile");
        f.write_all(br#"{"train_fraction": 0.75, "sead": 3}"#).unwrap();
        f.flush().unwrap();
        assert!(matches!(
            EvaluationConfig::from_json_file(f.path()),
            Err(Id3Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn validate_rejects_out_of_range_fraction() {
        for f in [0.0, 1.0, 2.0] {
            let c = EvaluationConfig {
                train_fraction: f,
                ..EvaluationConfig::default()
            };
            assert!(matches!(c.validate(), Err(Id3Error::InvalidParameter(_))));
        }
        let c = EvaluationConfig {
            label_attribute: Some("  ".into()),
            ..EvaluationConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn loads_partial_json_file() {
        let mut f = NamedTempFile::new().expect("tempfile");
        f.write_all(br#"{"train_fraction": 0.75, "seed": 3}"#).unwrap();
        f.flush().unwrap();

        let c = EvaluationConfig::from_json_file(f.path()).unwrap();
        assert_eq!(c.train_fraction, 0.75);
        assert_eq!(c.seed, Some(3));
        assert_eq!(c.split_values, SplitValuesKind::Observed);
    }

    #[test]
    fn malformed_json_file_is_invalid_parameter() {
        let mut f = NamedTempFile::new().expect("tempfile");
        f.write_all(b"{not json").unwrap();
        f.flush().unwrap();
        assert!(matches!(
            EvaluationConfig::from_json_file(f.path()),
            Err(Id3Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn build_classifier_carries_policy() {
        let c = EvaluationConfig {
            unseen_value_policy: UnseenValuePolicy::MajorityClass,
            ..EvaluationConfig::default()
        };
        let tree = c.build_classifier(&play_tennis());
        assert_eq!(tree.unseen_value_policy(), UnseenValuePolicy::MajorityClass);
        assert!(tree.root().is_none());
    }
}
