use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use id3::classifiers::Classifier;
use id3::classifiers::id3::{Id3Tree, SplitValues, SplitValuesKind, TreeBuilder};
use id3::classifiers::id3::split_criteria::{entropy, information_gain};
use id3::core::Dataset;
use id3::evaluation::{HoldoutEvaluator, TreeSummary};
use id3::ui::cli::args::{Cli, Command, EvaluateArgs, GainsArgs, OutputFormat, TreeArgs};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_GREY: &str = "\x1b[90m";

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Evaluate(args) => run_evaluate(args),
        Command::Tree(args) => run_tree(args),
        Command::Gains(args) => run_gains(args),
    }
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    let config = args.into_config()?;
    let format = args.output_format()?;
    let dataset = args.data.load(config.label_attribute.as_deref())?;

    let evaluator = HoldoutEvaluator::new(config.train_fraction, config.seed)
        .context("invalid evaluation settings")?;
    let mut tree = config.build_classifier(&dataset);
    let report = evaluator
        .run(&mut tree, &dataset)
        .context("evaluation failed")?
        .with_tree(TreeSummary::of(&tree));

    match format {
        OutputFormat::Text => {
            print_header(
                "Holdout Evaluation",
                &format!(
                    "train_fraction={}  seed={}  unseen_value={}  split_values={}",
                    config.train_fraction,
                    config
                        .seed
                        .map_or_else(|| "random".to_string(), |s| s.to_string()),
                    config.unseen_value_policy,
                    config.split_values
                ),
            );
            print!("{report}");
            println!(
                "{FG_GREEN}{BOLD}accuracy{RESET} {:.2}%",
                report.accuracy
            );
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("failed to serialize report")?;
            println!("{json}");
        }
    }

    if args.print_tree {
        println!();
        print!("{}", tree.render()?);
    }

    if let Some(path) = &args.dump_tree
        && !path.as_os_str().is_empty()
    {
        dump_tree(&tree, path)?;
    }

    Ok(())
}

fn run_tree(args: TreeArgs) -> Result<()> {
    let format = args.output_format()?;
    let dataset = args.data.load(None)?;

    let split_values = match args.split_values_kind()? {
        SplitValuesKind::Observed => SplitValues::Observed,
        SplitValuesKind::Domain => SplitValues::Domain(dataset.attribute_domains()),
    };
    let mut tree = Id3Tree::new(
        TreeBuilder::new().with_split_values(split_values),
        Default::default(),
    );
    tree.train(&dataset).context("failed to build tree")?;

    match format {
        OutputFormat::Text => {
            print_header(
                "ID3 Tree",
                &format!(
                    "records={}  label={}",
                    dataset.len(),
                    dataset.label_attribute()
                ),
            );
            print!("{}", tree.render()?);
        }
        OutputFormat::Json => println!("{}", tree_json(&tree)?),
    }
    Ok(())
}

fn run_gains(args: GainsArgs) -> Result<()> {
    let dataset = args.data.load(None)?;
    print_gains(&dataset)
}

fn print_gains(dataset: &Dataset) -> Result<()> {
    let records = dataset.record_refs();
    let label = dataset.label_attribute();

    print_header(
        "Information Gain",
        &format!("records={}  label={label}", dataset.len()),
    );
    println!(
        "{FG_CYAN}{BOLD}entropy{RESET} {:.6}",
        entropy(&records, label)?
    );

    let mut gains = Vec::new();
    for attribute in dataset.candidate_attributes() {
        let gain = information_gain(&records, &attribute, label)
            .with_context(|| format!("failed to score attribute '{attribute}'"))?;
        gains.push((attribute, gain));
    }
    gains.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let width = gains.iter().map(|(a, _)| a.len()).max().unwrap_or(0);
    for (attribute, gain) in gains {
        println!("  {attribute:<width$}  {gain:.6}");
    }
    Ok(())
}

fn tree_json(tree: &Id3Tree) -> Result<String> {
    let root = tree.root().context("tree has not been trained")?;
    serde_json::to_string_pretty(root).context("failed to serialize tree")
}

fn dump_tree(tree: &Id3Tree, path: &Path) -> Result<()> {
    fs::write(path, tree_json(tree)?)
        .with_context(|| format!("failed to write tree to {}", path.display()))
}

fn print_header(title: &str, details: &str) {
    println!("{BOLD}{FG_CYAN}▶ {title}{RESET}");
    println!("{DIM}{details}{RESET}  {}", timestamp_now());
    println!(
        "{FG_GREY}────────────────────────────────────────────────────────────────────────{RESET}"
    );
}

fn timestamp_now() -> String {
    use chrono::{Local, SecondsFormat};
    let now = Local::now();
    format!(
        "{DIM}{}{}",
        now.to_rfc3339_opts(SecondsFormat::Secs, true),
        RESET
    )
}
