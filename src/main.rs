//! Rough-learn: Rough Set Analysis CLI Tool
//!
//! Computes a rough set reduct of the student attributes, extracts decision
//! rules from it, and compares classifier accuracy with and without reduction.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use polars::prelude::DataFrame;

use roughlearn::cli::{confirm_synthetic_data, Cli};
use roughlearn::pipeline::{
    derive_target, drop_incomplete_rows, evaluate_reduct, generate_student_dataset, label_encode,
    load_dataset, reduce, reduct_rules, require_columns, target_distribution, Analysis,
    AnalysisConfig, DecisionTable, EvaluationConfig,
};
use roughlearn::report::{analysis_metadata, export_analysis, ComparisonSummary};
use roughlearn::utils::{
    print_attributes, print_banner, print_completion, print_config, print_count, print_info,
    print_step_header, print_step_time, print_success, print_warning, ConfigCard, StepSpinner,
};

fn init_logging(filter: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_filter());

    let conditions = cli.condition_attributes();
    let config = AnalysisConfig {
        tolerance: cli.tolerance,
        bins: usize::from(cli.bins),
        max_rules: cli.max_rules,
        manual_reduct: cli.manual_reduct(),
        evaluation: EvaluationConfig {
            test_size: cli.test_size,
            seed: cli.seed,
            n_trees: cli.trees,
        },
    };

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));

    // Print configuration card
    print_config(&ConfigCard {
        input: &cli.input,
        target: &cli.target,
        tolerance: config.tolerance,
        bins: config.bins,
        max_rules: config.max_rules,
        seed: config.evaluation.seed,
    });

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let Some((raw, source)) = load_input(&cli)? else {
        println!("Cancelled by user.");
        return Ok(());
    };
    let (rows, cols) = raw.shape();
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Source: {}", source);
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    print_step_time(step_start.elapsed());

    // Step 2: Build the decision table
    print_step_header(2, "Decision Table Construction");
    let step_start = Instant::now();
    let (encoded, encodings) = label_encode(&raw)?;
    for encoding in &encodings {
        print_info(&format!(
            "Encoded '{}' as {}",
            encoding.column,
            encoding
                .classes
                .iter()
                .enumerate()
                .map(|(code, class)| format!("{}={}", class, code))
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    let with_target = derive_target(&encoded, &cli.grade_column, cli.pass_mark, &cli.target)?;
    let (complete, dropped_rows) = drop_incomplete_rows(&with_target)?;
    if dropped_rows > 0 {
        print_warning(&format!("Dropped {} row(s) with missing values", dropped_rows));
    }

    require_columns(&complete, &conditions)?;

    let (poor, good) = target_distribution(&complete, &cli.target)?;
    println!(
        "      Target distribution: {} poor / {} good",
        style(poor).yellow(),
        style(good).yellow()
    );

    let table = DecisionTable::new(complete, conditions.clone(), &cli.target)
        .context("Failed to build decision table")?;
    print_success(&format!(
        "Decision table: {} objects, {} condition attributes",
        table.height(),
        conditions.len()
    ));
    print_step_time(step_start.elapsed());

    // Step 3: Rough set reduct
    print_step_header(3, "Rough Set Reduct");
    let step_start = Instant::now();
    let spinner = StepSpinner::start("Measuring attribute dependency...");
    let reduct = reduce(&table, &config).context("Failed to compute reduct")?;
    spinner.done(if config.manual_reduct.is_some() {
        "Using the supplied reduct"
    } else {
        "Reduct computed"
    });

    println!(
        "      Dependency (all attributes): {}",
        style(format!("{:.3}", reduct.full_dependency)).yellow()
    );
    println!(
        "      Dependency (reduct):         {}",
        style(format!("{:.3}", reduct.reduct_dependency)).yellow()
    );
    if reduct.removed.is_empty() {
        print_info("No attribute could be removed within tolerance");
    } else {
        print_count(
            "redundant attribute(s)",
            reduct.removed.len(),
            Some(&format!("(tolerance {:.3})", config.tolerance)),
        );
        print_attributes("Removed", &reduct.removed);
    }
    print_attributes("Reduct", &reduct.attributes);
    print_step_time(step_start.elapsed());

    // Step 4: Decision rules
    print_step_header(4, "Decision Rule Generation");
    let step_start = Instant::now();
    let spinner = StepSpinner::start("Grouping condition combinations...");
    let rules = reduct_rules(&table, &reduct, &config);
    if rules.is_fallback() {
        spinner.degraded("Fell back to simplified rules");
    } else {
        spinner.done("Rules extracted");
    }
    print_count("rule(s)", rules.rules().len(), None);
    print_step_time(step_start.elapsed());

    // Step 5: Classifier comparison
    print_step_header(5, "Classifier Comparison");
    let step_start = Instant::now();
    let spinner = StepSpinner::start(format!(
        "Training random forests ({} trees each)...",
        config.evaluation.n_trees
    ));
    let comparison = evaluate_reduct(&table, &reduct, &config)?;
    spinner.done("Both scenarios evaluated");
    println!(
        "      Train/test rows: {} / {}",
        comparison.baseline.train_rows, comparison.baseline.test_rows
    );
    print_step_time(step_start.elapsed());

    let analysis = Analysis {
        reduct,
        rules,
        comparison,
    };

    let summary = ComparisonSummary::new(&analysis);
    summary.display_rules();
    summary.display();
    summary.display_reduct_model();

    if let Some(report_path) = cli.report_path() {
        let metadata =
            analysis_metadata(&source, &cli.target, table.height(), &config, &encodings);
        export_analysis(&analysis, metadata, &report_path)?;
        println!();
        print_success(&format!("Report saved to {}", report_path.display()));
    }

    print_completion();

    Ok(())
}

/// Load the input file, or generate synthetic data when asked to or when the file is missing.
///
/// Returns None when the user declines the synthetic substitute.
fn load_input(cli: &Cli) -> Result<Option<(DataFrame, String)>> {
    let synthetic = || -> Result<(DataFrame, String)> {
        let spinner = StepSpinner::start("Generating synthetic student data...");
        let df = generate_student_dataset(cli.samples, cli.seed)?;
        spinner.degraded("Synthetic dataset generated (for demonstration only)");
        Ok((df, "synthetic".to_string()))
    };

    if cli.synthetic {
        return synthetic().map(Some);
    }

    if cli.input.exists() {
        let spinner = StepSpinner::start("Reading dataset...");
        let df = load_dataset(&cli.input, cli.separator, cli.infer_schema_length)?;
        spinner.done("Dataset loaded");
        return Ok(Some((df, cli.input.display().to_string())));
    }

    if cli.no_confirm {
        print_warning(&format!(
            "{} not found, using synthetic data",
            cli.input.display()
        ));
        return synthetic().map(Some);
    }

    if confirm_synthetic_data(&cli.input, cli.samples)? {
        synthetic().map(Some)
    } else {
        Ok(None)
    }
}
