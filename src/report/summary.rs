//! Console rendering of the analysis report and the modeling plan

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use serde_json::Value;

use super::eda_report::EdaReport;
use crate::pipeline::{
    ImbalanceSeverity, BIAS_FAIRNESS_CHECKLIST, CHOSEN_MODEL, DATASET_CHALLENGES,
    DATASET_STRENGTHS, EVALUATION_METRICS, FAIRNESS_PRINCIPLES, FEATURE_ENGINEERING,
    IMBALANCE_WARNING_PERCENT, MODEL_SHORTLIST, NEXT_STEPS,
};
use crate::utils::{print_bullet, print_count, print_info, print_section, print_success, print_warning};

/// Correlations at or beyond this magnitude are highlighted
const STRONG_CORRELATION: f64 = 0.3;

/// Render every section of the report
pub fn display_report(report: &EdaReport) {
    display_overview(report);
    display_missing(report);
    display_target(report);
    display_samples(report);
    display_group_means(report);
    display_correlations(report);
    display_feature_distributions(report);
    display_recommendations(report);
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn print_table(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn fmt_stat(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.2}", value)
    }
}

fn correlation_color(value: f64) -> Color {
    if value.is_nan() {
        Color::DarkGrey
    } else if value >= STRONG_CORRELATION {
        Color::Red
    } else if value <= -STRONG_CORRELATION {
        Color::Green
    } else {
        Color::White
    }
}

fn display_overview(report: &EdaReport) {
    print_section("📋", "DATASET OVERVIEW");

    let mut table = new_table(&["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Total Records"),
        Cell::new(report.overview.total_records),
    ]);
    table.add_row(vec![
        Cell::new("Total Columns"),
        Cell::new(report.overview.total_columns),
    ]);
    table.add_row(vec![
        Cell::new("Memory Usage"),
        Cell::new(format!("{:.2} KB", report.overview.memory_usage_kb)),
    ]);
    print_table(&table);

    println!();
    let mut table = new_table(&["Column", "Type", "Kind", "Has Nulls"]);
    for column in &report.columns {
        table.add_row(vec![
            Cell::new(&column.name),
            Cell::new(&column.dtype),
            Cell::new(column.kind),
            Cell::new(if column.nullable { "yes" } else { "no" }),
        ]);
    }
    print_table(&table);

    println!();
    for count in &report.dtype_counts {
        print_bullet(&format!("{}: {} column(s)", count.dtype, count.count));
    }

    if !report.numeric_summary.is_empty() {
        println!();
        let mut table = new_table(&[
            "Column", "Count", "Mean", "Std", "Min", "25%", "Median", "75%", "Max",
        ]);
        for summary in &report.numeric_summary {
            let stats = &summary.stats;
            table.add_row(vec![
                Cell::new(&summary.column).add_attribute(Attribute::Bold),
                Cell::new(stats.count),
                Cell::new(fmt_stat(stats.mean)),
                Cell::new(fmt_stat(stats.std)),
                Cell::new(fmt_stat(stats.min)),
                Cell::new(fmt_stat(stats.q25)),
                Cell::new(fmt_stat(stats.median)),
                Cell::new(fmt_stat(stats.q75)),
                Cell::new(fmt_stat(stats.max)),
            ]);
        }
        print_table(&table);
    }
}

fn display_missing(report: &EdaReport) {
    print_section("🕳️", "MISSING VALUES");

    if report.missing.is_empty() {
        print_success("No missing values found");
        return;
    }

    print_count("column(s) with missing values", report.missing.len(), None);
    println!();

    let mut table = new_table(&["Column", "Missing", "Percent"]);
    for entry in &report.missing.entries {
        table.add_row(vec![
            Cell::new(&entry.column),
            Cell::new(entry.null_count),
            Cell::new(format!("{:.2}%", entry.null_percent)).fg(Color::Yellow),
        ]);
    }
    print_table(&table);

    println!();
    print_info(&format!(
        "{} missing cells ({:.2}% of the dataset)",
        report.missing.total_missing, report.missing.percent_of_dataset
    ));

    if !report.imputation.is_empty() {
        println!();
        println!("      {}", style("Imputation guidance").yellow());
        for guidance in &report.imputation {
            print_bullet(&format!(
                "{}: {} ({})",
                style(guidance.column).bold(),
                guidance.strategy,
                guidance.note
            ));
        }
        println!("      {}", style(crate::pipeline::MEDIAN_RATIONALE).dim());
    }
}

fn display_target(report: &EdaReport) {
    print_section(
        "🎯",
        &format!("TARGET DISTRIBUTION: {}", report.metadata.target_column),
    );

    let mut table = new_table(&["Value", "Count", "Percent"]);
    for class in &report.target_distribution.classes {
        table.add_row(vec![
            Cell::new(&class.value),
            Cell::new(class.count),
            Cell::new(format!("{:.2}%", class.percent)),
        ]);
    }
    print_table(&table);

    if let Some(minority) = report.imbalance_warning {
        println!();
        print_warning(&format!(
            "Class imbalance: minority class is {:.2}% of rows (below {:.0}%)",
            minority, IMBALANCE_WARNING_PERCENT
        ));
    }
}

fn display_samples(report: &EdaReport) {
    let samples = &report.samples;
    if samples.positive.is_empty() && samples.negative.is_empty() {
        return;
    }

    print_section("🔍", "SAMPLE RECORDS BY CLASS");
    for (label, rows) in [("Target = 1", &samples.positive), ("Target = 0", &samples.negative)] {
        println!();
        println!(
            "      {} {}",
            style(label).yellow(),
            style(format!("({} rows)", rows.len())).dim()
        );
        if rows.is_empty() {
            continue;
        }
        let headers: Vec<&str> = samples.columns.iter().map(String::as_str).collect();
        let mut table = new_table(&headers);
        for row in rows {
            table.add_row(row.iter().map(json_cell).collect::<Vec<_>>());
        }
        print_table(&table);
    }
}

fn json_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::new("null").fg(Color::DarkGrey),
        Value::String(s) => Cell::new(s),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v.fract() == 0.0 => Cell::new(format!("{}", v)),
            Some(v) => Cell::new(format!("{:.2}", v)),
            None => Cell::new(n),
        },
        other => Cell::new(other),
    }
}

fn display_group_means(report: &EdaReport) {
    let means = &report.group_means;
    if means.is_empty() {
        return;
    }

    print_section("⚖️", "MEANS BY TARGET CLASS");
    let mut headers = vec!["Target"];
    headers.extend(means.columns.iter().map(String::as_str));
    let mut table = new_table(&headers);
    for group in &means.groups {
        let mut row = vec![Cell::new(&group.value).add_attribute(Attribute::Bold)];
        row.extend(group.means.iter().map(|m| Cell::new(fmt_stat(*m))));
        table.add_row(row);
    }
    print_table(&table);
}

fn display_correlations(report: &EdaReport) {
    print_section("🔗", "CORRELATION WITH TARGET");

    if report.correlations.is_empty() {
        print_info("Target is not numeric or no numeric features are correlated");
    } else {
        let mut table = new_table(&["Feature", "Correlation"]);
        for entry in &report.correlations.correlations {
            table.add_row(vec![
                Cell::new(&entry.feature),
                Cell::new(format!("{:+.4}", entry.correlation))
                    .fg(correlation_color(entry.correlation)),
            ]);
        }
        print_table(&table);
    }

    let matrix = &report.correlation_matrix;
    if matrix.columns.len() < 2 {
        return;
    }
    println!();
    println!("      {}", style("Correlation matrix").yellow());
    let mut headers = vec![""];
    headers.extend(matrix.columns.iter().map(String::as_str));
    let mut table = new_table(&headers);
    for (name, row) in matrix.columns.iter().zip(&matrix.values) {
        let mut cells = vec![Cell::new(name).add_attribute(Attribute::Bold)];
        cells.extend(
            row.iter()
                .map(|v| Cell::new(fmt_stat(*v)).fg(correlation_color(*v))),
        );
        table.add_row(cells);
    }
    print_table(&table);
}

fn display_feature_distributions(report: &EdaReport) {
    if report.feature_distributions.is_empty() {
        return;
    }

    print_section("📊", "FEATURE DISTRIBUTIONS BY CLASS");
    for description in &report.feature_distributions {
        println!();
        println!("      {}", style(&description.column).yellow());
        let mut table = new_table(&[
            "Target", "Count", "Mean", "Std", "Min", "25%", "Median", "75%", "Max",
        ]);
        for (value, stats) in &description.groups {
            table.add_row(vec![
                Cell::new(value).add_attribute(Attribute::Bold),
                Cell::new(stats.count),
                Cell::new(fmt_stat(stats.mean)),
                Cell::new(fmt_stat(stats.std)),
                Cell::new(fmt_stat(stats.min)),
                Cell::new(fmt_stat(stats.q25)),
                Cell::new(fmt_stat(stats.median)),
                Cell::new(fmt_stat(stats.q75)),
                Cell::new(fmt_stat(stats.max)),
            ]);
        }
        print_table(&table);
    }
}

fn display_recommendations(report: &EdaReport) {
    print_section("🤖", "MODEL RECOMMENDATIONS");

    let recs = &report.recommendations;
    match recs.class_imbalance {
        Some(assessment) => {
            let severity = match assessment.severity {
                ImbalanceSeverity::Severe => style(assessment.severity.as_str()).red().bold(),
                ImbalanceSeverity::Moderate => style(assessment.severity.as_str()).yellow().bold(),
                ImbalanceSeverity::Mild => style(assessment.severity.as_str()).green().bold(),
            };
            println!(
                "      Class imbalance: {} (minority {:.2}%)",
                severity, assessment.minority_percent
            );
        }
        None => print_info("Class imbalance not assessed: target has no values"),
    }
    for strategy in recs.imbalance_strategies {
        print_bullet(strategy);
    }

    println!();
    let mut table = new_table(&["Model", "When to use"]);
    for model in recs.suggested_models {
        table.add_row(vec![
            Cell::new(model.name).add_attribute(Attribute::Bold),
            Cell::new(model.when_to_use),
        ]);
    }
    print_table(&table);
    println!();
    print_info("Run `riskscope plan` for the full modeling plan");
}

/// Render the data-independent modeling plan
pub fn display_model_plan() {
    print_section("📌", "DATASET ASSESSMENT");
    println!("      {}", style("Strengths").green());
    for item in &DATASET_STRENGTHS {
        print_bullet(item);
    }
    println!("      {}", style("Challenges").yellow());
    for item in &DATASET_CHALLENGES {
        print_bullet(item);
    }

    print_section("🤖", "MODEL SHORTLIST");
    let mut table = new_table(&["Model", "Pros", "Cons", "When to use"]);
    for model in &MODEL_SHORTLIST {
        table.add_row(vec![
            Cell::new(model.name).add_attribute(Attribute::Bold),
            Cell::new(model.pros.join("\n")).fg(Color::Green),
            Cell::new(model.cons.join("\n")).fg(Color::Red),
            Cell::new(model.when_to_use),
        ]);
    }
    print_table(&table);

    print_section("🧮", &format!("CHOSEN MODEL: {}", CHOSEN_MODEL.model_type));
    println!("      {}", CHOSEN_MODEL.description);
    println!();
    for step in CHOSEN_MODEL.workflow {
        println!("      {}", step);
    }
    println!();
    println!("      {}", style("Key features").yellow());
    for feature in CHOSEN_MODEL.key_features {
        print_bullet(feature);
    }
    println!();
    for line in CHOSEN_MODEL.pseudocode.lines() {
        println!("        {}", style(line).dim());
    }

    print_section("📏", "EVALUATION METRICS");
    let mut table = new_table(&["Metric", "Definition", "Use case"]);
    for metric in &EVALUATION_METRICS {
        let mut definition = metric.definition.to_string();
        if let Some(formula) = metric.formula {
            definition.push_str(&format!("\n{}", formula));
        }
        table.add_row(vec![
            Cell::new(metric.name).add_attribute(Attribute::Bold),
            Cell::new(definition),
            Cell::new(metric.use_case),
        ]);
    }
    print_table(&table);

    print_section("⚖️", "BIAS AND FAIRNESS");
    for item in &BIAS_FAIRNESS_CHECKLIST {
        print_bullet(item);
    }
    println!();
    for principle in &FAIRNESS_PRINCIPLES {
        print_bullet(principle);
    }

    print_section("🛠️", "FEATURE ENGINEERING");
    for group in &FEATURE_ENGINEERING {
        println!("      {}", style(group.name).yellow());
        for item in group.items {
            print_bullet(item);
        }
    }

    print_section("➡️", "NEXT STEPS");
    for group in &NEXT_STEPS {
        println!("      {}", style(group.name).yellow());
        for item in group.items {
            print_bullet(item);
        }
    }
}
