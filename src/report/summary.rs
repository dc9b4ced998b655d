//! Console report of the scenario comparison and extracted rules

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{Analysis, ClassificationReport, ConfusionMatrix, RuleSet};

/// Summary of one analysis run, printed at the end of the pipeline
#[derive(Debug)]
pub struct ComparisonSummary<'a> {
    pub analysis: &'a Analysis,
}

impl<'a> ComparisonSummary<'a> {
    pub fn new(analysis: &'a Analysis) -> Self {
        Self { analysis }
    }

    /// Print the results table
    pub fn display(&self) {
        let comparison = &self.analysis.comparison;
        let reduct = &self.analysis.reduct;

        print_section("📋", "RESULTS SUMMARY");

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new(format!(
                "📁 Original Accuracy ({} features)",
                comparison.baseline.features.len()
            )),
            Cell::new(format!("{:.2}%", comparison.baseline.accuracy * 100.0)),
        ]);
        table.add_row(vec![
            Cell::new(format!(
                "✂️  Reduct Accuracy ({} features)",
                comparison.reduct.features.len()
            )),
            Cell::new(format!("{:.2}%", comparison.reduct.accuracy * 100.0))
                .add_attribute(Attribute::Bold),
        ]);

        let delta = comparison.accuracy_delta() * 100.0;
        table.add_row(vec![
            Cell::new("📈 Improvement"),
            Cell::new(format!("{:+.2}%", delta)).fg(if delta >= 0.0 {
                Color::Green
            } else {
                Color::Red
            }),
        ]);

        table.add_row(vec![
            Cell::new("🗑️  Attributes Removed"),
            Cell::new(format!(
                "{} ({:.1}% reduction)",
                comparison.features_removed(),
                comparison.reduction_pct()
            ))
            .fg(Color::Cyan),
        ]);

        table.add_row(vec![
            Cell::new("🔗 Dependency (full / reduct)"),
            Cell::new(format!(
                "{:.3} / {:.3}",
                reduct.full_dependency, reduct.reduct_dependency
            )),
        ]);

        print_indented(&table);
    }

    /// Print the ranked rule list, noting when the simplified scheme was used
    pub fn display_rules(&self) {
        print_section("📜", "TOP DECISION RULES (from reduct attributes)");
        display_rule_set(&self.analysis.rules);
    }

    /// Print the classification report and confusion matrix for the reduct model
    pub fn display_reduct_model(&self) {
        let scenario = &self.analysis.comparison.reduct;
        print_section("🧮", "CLASSIFICATION REPORT (reduct model)");
        print_indented(&classification_table(&scenario.report));

        print_section("🔢", "CONFUSION MATRIX (reduct model)");
        print_indented(&confusion_table(&scenario.confusion));
    }
}

/// Print the rules of a rule set, one per line
pub fn display_rule_set(rules: &RuleSet) {
    if let Some(reason) = rules.fallback_reason() {
        println!(
            "      {} {}",
            style("Note:").yellow().bold(),
            style(format!("Using simplified rule generation due to: {}", reason)).yellow()
        );
        println!();
    }

    if rules.rules().is_empty() {
        println!("      {}", style("No rules could be generated").dim());
        return;
    }

    for (i, rule) in rules.rules().iter().enumerate() {
        println!(
            "      {} {}",
            style(format!("Rule {:>2}:", i + 1)).cyan().bold(),
            rule
        );
    }
}

fn classification_table(report: &ClassificationReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new(""),
        Cell::new("precision").add_attribute(Attribute::Bold),
        Cell::new("recall").add_attribute(Attribute::Bold),
        Cell::new("f1-score").add_attribute(Attribute::Bold),
        Cell::new("support").add_attribute(Attribute::Bold),
    ]);

    for metrics in report
        .classes
        .iter()
        .chain([&report.macro_avg, &report.weighted_avg])
    {
        table.add_row(vec![
            Cell::new(&metrics.label),
            Cell::new(format!("{:.2}", metrics.precision)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", metrics.recall)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", metrics.f1)).set_alignment(CellAlignment::Right),
            Cell::new(metrics.support).set_alignment(CellAlignment::Right),
        ]);
    }

    table.add_row(vec![
        Cell::new("accuracy"),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format!("{:.2}", report.accuracy)).set_alignment(CellAlignment::Right),
        Cell::new(report.weighted_avg.support).set_alignment(CellAlignment::Right),
    ]);

    table
}

fn confusion_table(matrix: &ConfusionMatrix) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Actual \\ Predicted").add_attribute(Attribute::Bold),
        Cell::new("Poor").add_attribute(Attribute::Bold),
        Cell::new("Good").add_attribute(Attribute::Bold),
    ]);

    for (label, row) in ["Poor", "Good"].iter().zip(matrix.counts.iter()) {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(row[0]).set_alignment(CellAlignment::Right),
            Cell::new(row[1]).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

fn print_section(icon: &str, title: &str) {
    println!();
    println!("    {} {}", style(icon).cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!();
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}
