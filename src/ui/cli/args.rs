use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueHint};
use strum_macros::{Display, EnumString};

use crate::classifiers::id3::{SplitValuesKind, UnseenValuePolicy};
use crate::config::{EvaluationConfig, KeyValue, parse_key_value};
use crate::core::Dataset;
use crate::sources::DelimitedSource;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Build, inspect and evaluate ID3 decision trees on categorical data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Train on a shuffled share of the rows and report accuracy on the rest
    Evaluate(EvaluateArgs),
    /// Build a tree from every row and print it
    Tree(TreeArgs),
    /// Print the label entropy and the information gain of every attribute
    Gains(GainsArgs),
}

#[derive(Debug, Args)]
pub struct DataArgs {
    /// Delimited text file with a header line
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub data: PathBuf,

    /// Label column (defaults to the first column)
    #[arg(long, value_name = "NAME")]
    pub label: Option<String>,

    /// Field delimiter
    #[arg(long, default_value_t = ',', value_name = "CHAR")]
    pub delimiter: char,
}

impl DataArgs {
    pub fn load(&self, label_override: Option<&str>) -> Result<Dataset> {
        let label = self.label.as_deref().or(label_override).map(str::to_string);
        DelimitedSource::new()
            .with_delimiter(self.delimiter)
            .with_label_attribute(label)
            .read_path(&self.data)
            .with_context(|| format!("failed to load dataset {}", self.data.display()))
    }
}

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// JSON file with evaluation settings
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Share of rows used for training, strictly between 0 and 1
    #[arg(long, value_name = "F")]
    pub train_fraction: Option<f64>,

    /// Seed for the train/test shuffle (omit for a random one)
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// What to do with attribute values the tree never saw (fail, majority-class)
    #[arg(long, value_name = "POLICY")]
    pub unseen_value: Option<String>,

    /// Branch on observed values or on every value in the file (observed, domain)
    #[arg(long, value_name = "SOURCE")]
    pub split_values: Option<String>,

    /// Override evaluation settings (key=value, nested keys with dots)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub overrides: Vec<KeyValue>,

    /// Print the trained tree after the report
    #[arg(long)]
    pub print_tree: bool,

    /// Write the trained tree as JSON to this file
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub dump_tree: Option<PathBuf>,

    /// Report format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub report_format: String,
}

impl EvaluateArgs {
    /// Settings layered as: config file (or CLI defaults), `--set` overrides,
    /// then the dedicated flags.
    pub fn into_config(&self) -> Result<EvaluationConfig> {
        let base = match &self.config {
            Some(path) => load_config(path)?,
            None => EvaluationConfig {
                unseen_value_policy: UnseenValuePolicy::MajorityClass,
                ..EvaluationConfig::default()
            },
        };

        let mut config = base
            .with_overrides(&self.overrides)
            .context("failed to apply --set overrides")?;

        if let Some(label) = &self.data.label {
            config.label_attribute = Some(label.clone());
        }
        if let Some(fraction) = self.train_fraction {
            config.train_fraction = fraction;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(raw) = &self.unseen_value {
            config.unseen_value_policy = parse_kind::<UnseenValuePolicy>(raw)
                .with_context(|| format!("invalid unseen-value policy '{raw}'"))?;
        }
        if let Some(raw) = &self.split_values {
            config.split_values = parse_kind::<SplitValuesKind>(raw)
                .with_context(|| format!("invalid split-values source '{raw}'"))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        parse_kind::<OutputFormat>(&self.report_format)
            .with_context(|| format!("invalid report format '{}'", self.report_format))
    }
}

#[derive(Debug, Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Branch on observed values or on every value in the file (observed, domain)
    #[arg(long, default_value = "observed", value_name = "SOURCE")]
    pub split_values: String,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: String,
}

impl TreeArgs {
    pub fn split_values_kind(&self) -> Result<SplitValuesKind> {
        parse_kind::<SplitValuesKind>(&self.split_values)
            .with_context(|| format!("invalid split-values source '{}'", self.split_values))
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        parse_kind::<OutputFormat>(&self.format)
            .with_context(|| format!("invalid format '{}'", self.format))
    }
}

#[derive(Debug, Args)]
pub struct GainsArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn load_config(path: &Path) -> Result<EvaluationConfig> {
    EvaluationConfig::from_json_file(path)
        .with_context(|| format!("failed to read config {}", path.display()))
}

/// Parses a kebab-case enum name, accepting any case and `_` for `-`.
fn parse_kind<T: FromStr>(raw: &str) -> Result<T> {
    let normalized = raw.trim().to_lowercase().replace('_', "-");
    normalized
        .parse::<T>()
        .map_err(|_| anyhow!("could not parse value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("id3").chain(args.iter().copied())).unwrap()
    }

    fn evaluate_args(args: &[&str]) -> EvaluateArgs {
        let mut full = vec!["evaluate", "--data", "tennis.csv"];
        full.extend_from_slice(args);
        match parse(&full).command {
            Command::Evaluate(a) => a,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn spellings_cover_common_casings() {
        assert_eq!(
            parse_kind::<UnseenValuePolicy>("Majority_Class").unwrap(),
            UnseenValuePolicy::MajorityClass
        );
        assert_eq!(
            parse_kind::<SplitValuesKind>(" Domain ").unwrap(),
            SplitValuesKind::Domain
        );
        assert!(parse_kind::<OutputFormat>("yaml").is_err());
        assert!(parse_kind::<OutputFormat>("").is_err());
    }

    #[test]
    fn defaults_without_config_file() {
        let config = evaluate_args(&[]).into_config().unwrap();
        assert_eq!(config.train_fraction, 0.5);
        assert_eq!(config.unseen_value_policy, UnseenValuePolicy::MajorityClass);
        assert_eq!(config.split_values, SplitValuesKind::Observed);
        assert!(config.label_attribute.is_none());
    }

    #[test]
    fn flags_win_over_overrides() {
        let config = evaluate_args(&[
            "--set",
            "train_fraction=0.9",
            "--set",
            "seed=1",
            "--train-fraction",
            "0.7",
            "--unseen-value",
            "fail",
            "--split-values",
            "domain",
            "--label",
            "play-tennis",
        ])
        .into_config()
        .unwrap();
        assert_eq!(config.train_fraction, 0.7);
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.unseen_value_policy, UnseenValuePolicy::Fail);
        assert_eq!(config.split_values, SplitValuesKind::Domain);
        assert_eq!(config.label_attribute.as_deref(), Some("play-tennis"));
    }

    #[test]
    fn config_file_is_the_base_layer() {
        let mut f = NamedTempFile::new().expect("tempfile");
        f.write_all(br#"{"train_fraction": 0.25, "seed": 4}"#).unwrap();
        f.flush().unwrap();
        let path = f.path().to_string_lossy().into_owned();

        let config = evaluate_args(&["--config", &path, "--seed", "8"])
            .into_config()
            .unwrap();
        assert_eq!(config.train_fraction, 0.25);
        assert_eq!(config.seed, Some(8));
        assert_eq!(config.unseen_value_policy, UnseenValuePolicy::Fail);
    }

    #[test]
    fn out_of_range_fraction_is_rejected() {
        assert!(evaluate_args(&["--train-fraction", "1.5"]).into_config().is_err());
        assert!(evaluate_args(&["--unseen-value", "guess"]).into_config().is_err());
    }

    #[test]
    fn malformed_set_is_a_parse_error() {
        assert!(
            Cli::try_parse_from(["id3", "evaluate", "--data", "x.csv", "--set", "novalue"])
                .is_err()
        );
    }

    #[test]
    fn tree_and_gains_subcommands() {
        match parse(&["tree", "--data", "x.csv", "--format", "json", "--delimiter", ";"]).command {
            Command::Tree(a) => {
                assert_eq!(a.output_format().unwrap(), OutputFormat::Json);
                assert_eq!(a.split_values_kind().unwrap(), SplitValuesKind::Observed);
                assert_eq!(a.data.delimiter, ';');
            }
            other => panic!("unexpected command: {other:?}"),
        }
        match parse(&["gains", "--data", "x.csv", "--label", "wind"]).command {
            Command::Gains(a) => assert_eq!(a.data.label.as_deref(), Some("wind")),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
