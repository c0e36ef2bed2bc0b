//! riskscope: Delinquency EDA CLI Tool
//!
//! Loads a customer dataset, runs the exploratory analyses in order, prints
//! them, and writes a JSON report plus a CSV summary.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use riskscope::cli::{select_features, select_target, Cli, Commands};
use riskscope::pipeline::{
    default_distribution_features, distribution_eligible, load_dataset, numeric_columns,
    require_column, resolve_target,
};
use riskscope::report::{
    display_model_plan, display_report, export_report_json, export_summary_csv,
    package_reports, AnalysisOptions, EdaReport, TargetSource,
};
use riskscope::utils::{
    create_spinner, finish_with_success, finish_with_warning, init_logging, print_banner,
    print_completion, print_config, print_info, print_step_header, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    if let Some(Commands::Plan) = &cli.command {
        print_banner(env!("CARGO_PKG_VERSION"));
        display_model_plan();
        println!();
        return Ok(());
    }

    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;
    let report_path = cli
        .report_path()
        .ok_or_else(|| anyhow::anyhow!("Could not derive report path from input"))?;
    let summary_path = cli
        .summary_path()
        .ok_or_else(|| anyhow::anyhow!("Could not derive summary path from input"))?;

    print_banner(env!("CARGO_PKG_VERSION"));
    let started = Instant::now();

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let spinner = create_spinner("Reading dataset...");
    let df = load_dataset(input, cli.infer_schema_length)?;
    finish_with_success(
        &spinner,
        &format!("Loaded {} rows x {} columns", df.height(), df.width()),
    );

    // Step 2: Choose target and features
    print_step_header(2, "Select Target");
    let heuristic = resolve_target(&df)?;
    let (target, target_source) = match &cli.target {
        Some(target) => (target.clone(), TargetSource::User),
        None if cli.no_confirm => (heuristic, TargetSource::Heuristic),
        None => {
            let columns: Vec<String> = df
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect();
            let default_index = columns.iter().position(|c| *c == heuristic).unwrap_or(0);
            let chosen = select_target(&columns, default_index)?;
            let source = if chosen == heuristic {
                TargetSource::Heuristic
            } else {
                TargetSource::User
            };
            (chosen, source)
        }
    };
    require_column(&df, &target)?;

    let feature_columns = match cli.feature_columns() {
        Some(columns) => Some(columns),
        None if !cli.no_confirm && distribution_eligible(&df, &target)? => {
            let numeric: Vec<String> = numeric_columns(&df)
                .into_iter()
                .filter(|c| *c != target)
                .collect();
            let preselected = default_distribution_features(&df, &target);
            Some(select_features(&numeric, &preselected)?)
        }
        None => None,
    };

    print_config(input, &target, &report_path);
    if target_source == TargetSource::Heuristic {
        print_info(&format!(
            "Using '{}' as target (matched by column name)",
            style(&target).cyan()
        ));
    }

    // Step 3: Analyze
    print_step_header(3, "Analyze");
    let spinner = create_spinner("Running analyses...");
    let options = AnalysisOptions {
        input_file: input.display().to_string(),
        target: target.clone(),
        target_source,
        feature_columns,
        sample_size: cli.sample_size,
    };
    let report = EdaReport::build(&df, &options)?;
    match report.imbalance_warning {
        Some(minority) => finish_with_warning(
            &spinner,
            &format!("Analysis complete; minority class at {:.2}%", minority),
        ),
        None => finish_with_success(&spinner, "Analysis complete"),
    }

    display_report(&report);

    // Step 4: Save
    print_step_header(4, "Save Results");
    let spinner = create_spinner("Writing reports...");
    export_report_json(&report, &report_path)?;
    export_summary_csv(&report, &summary_path)?;

    if cli.bundle {
        let bundle_path = cli
            .bundle_path()
            .ok_or_else(|| anyhow::anyhow!("Could not derive bundle path from input"))?;
        package_reports(&report_path, &summary_path, &bundle_path)?;
        finish_with_success(&spinner, &format!("Saved {}", bundle_path.display()));
    } else {
        finish_with_success(&spinner, "Reports written");
        print_success(&format!("Report:  {}", report_path.display()));
        print_success(&format!("Summary: {}", summary_path.display()));
    }

    print_info(&format!(
        "Finished in {:.2}s",
        started.elapsed().as_secs_f64()
    ));
    print_completion();

    Ok(())
}
