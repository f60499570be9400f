//! RUL Dataset Preparation Tool
//!
//! Configuration-driven tool that turns raw turbofan degradation logs into
//! labeled, normalized training and evaluation datasets.
//!
//! ## Output
//!
//! - **Train**: labeled run-to-failure dataset (RUL reaches 0 per unit)
//! - **Eval**: labeled censored dataset (RUL from ground-truth offsets)
//! - **Metadata**: `{stem}_metadata.json` next to each output, recording
//!   thresholds and the exact scaling ranges applied
//!
//! # Usage
//!
//! ```bash
//! # From TOML config
//! cargo run --release --bin prepare_dataset -- --config configs/fd001.toml
//!
//! # Generate sample config
//! cargo run --release --bin prepare_dataset -- --generate-config fd001.toml
//!
//! # Validate a config without running
//! cargo run --release --bin prepare_dataset -- --validate configs/fd001.toml
//! ```
//!
//! # Configuration
//!
//! See `config::PipelineConfig` for full configuration options.

use rul_dataprep::config::{ExperimentMetadata, PipelineConfig};
use rul_dataprep::pipeline::{Pipeline, PipelineOutput};

fn main() {
    env_logger::init();

    // Simple argument parsing
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "--config" => {
            if args.len() < 3 {
                eprintln!("Error: --config requires a path argument");
                std::process::exit(1);
            }
            run_from_config(&args[2]);
        }
        "--generate-config" => {
            if args.len() < 3 {
                eprintln!("Error: --generate-config requires a path argument");
                std::process::exit(1);
            }
            generate_sample_config(&args[2]);
        }
        "--validate" => {
            if args.len() < 3 {
                eprintln!("Error: --validate requires a path argument");
                std::process::exit(1);
            }
            validate_config(&args[2]);
        }
        "--help" | "-h" => {
            print_usage(&args[0]);
        }
        _ => {
            eprintln!("Unknown argument: {}", args[1]);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!(
        r#"
RUL Dataset Preparation Tool

Usage:
    {program} --config <path.toml>       Prepare datasets from config file
    {program} --generate-config <path>   Generate sample config file
    {program} --validate <path.toml>     Check a config without running
    {program} --help                     Show this help

Examples:
    # Prepare the FD001 benchmark datasets
    {program} --config configs/fd001.toml

    # Generate sample config
    {program} --generate-config configs/my_run.toml

For configuration options, see the generated sample config.
"#
    );
}

/// Generate a sample configuration file
fn generate_sample_config(path: &str) {
    let sample_config = PipelineConfig::default().with_metadata(ExperimentMetadata {
        name: "FD001 Baseline".to_string(),
        description: Some("Run-to-failure + censored preparation with w1=30, w0=15".to_string()),
        created_at: Some(chrono::Utc::now().to_rfc3339()),
        version: Some("1.0.0".to_string()),
        tags: Some(vec!["fd001".to_string(), "baseline".to_string()]),
    });

    match sample_config.save_toml(path) {
        Ok(()) => {
            println!("Generated sample config: {path}");
            println!("\nEdit the following fields before running:");
            println!("  - paths.run_to_failure: raw run-to-failure log");
            println!("  - paths.evaluation:     raw censored log");
            println!("  - paths.offsets:        ground-truth RUL offsets");
            println!("  - paths.train_output / paths.eval_output");
        }
        Err(e) => {
            eprintln!("Error generating config: {e}");
            std::process::exit(1);
        }
    }
}

/// Validate a configuration file without touching any data
fn validate_config(config_path: &str) {
    match PipelineConfig::load_toml(config_path) {
        Ok(_) => println!("Configuration is valid: {config_path}"),
        Err(e) => {
            eprintln!("Configuration validation failed: {e}");
            std::process::exit(1);
        }
    }
}

/// Run preparation from configuration file
fn run_from_config(config_path: &str) {
    let config = match PipelineConfig::load_toml(config_path) {
        Ok(c) => {
            println!("Loaded configuration: {config_path}");
            c
        }
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    print_config_summary(&config);

    let pipeline = match Pipeline::from_config(config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Pipeline setup failed: {e}");
            std::process::exit(1);
        }
    };

    match pipeline.run() {
        Ok(output) => print_run_summary(&output),
        Err(e) => {
            eprintln!("Preparation failed: {e}");
            std::process::exit(1);
        }
    }
}

fn print_config_summary(config: &PipelineConfig) {
    println!("┌─ Configuration Summary ──────────────────────────────");
    if let Some(ref metadata) = config.metadata {
        println!("│ Experiment: {}", metadata.name);
    }
    println!("│ Thresholds: w1={}, w0={}", config.thresholds.w1, config.thresholds.w0);
    println!(
        "│ Degenerate columns: {:?}",
        config.scaling.degenerate_policy
    );
    println!("│ Delimiter:  {:?}", config.delimiter);
    println!("│");
    println!("│ Run-to-failure: {}", config.paths.run_to_failure.display());
    println!("│ Evaluation:     {}", config.paths.evaluation.display());
    println!("│ Offsets:        {}", config.paths.offsets.display());
    println!("│ Train output:   {}", config.paths.train_output.display());
    println!("│ Eval output:    {}", config.paths.eval_output.display());
    println!("└──────────────────────────────────────────────────────");
    println!();
}

fn print_run_summary(output: &PipelineOutput) {
    println!("Preparation complete");
    println!(
        "  Train: {} rows, {} units -> {}",
        output.train_rows,
        output.train_units,
        output.train_path.display()
    );
    println!(
        "  Eval:  {} rows, {} units -> {}",
        output.eval_rows,
        output.eval_units,
        output.eval_path.display()
    );

    for (name, stats) in [
        ("train", &output.train_label_stats),
        ("eval", &output.eval_label_stats),
    ] {
        let (healthy, warning, critical) = stats.class_balance();
        println!(
            "  {name} label balance: healthy {:.1}%, warning {:.1}%, critical {:.1}% (majority: {})",
            healthy * 100.0,
            warning * 100.0,
            critical * 100.0,
            stats.majority_zone(),
        );
    }
}
