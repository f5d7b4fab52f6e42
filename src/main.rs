//! ClimateVis CLI
//!
//! Usage:
//!   climatevis [OPTIONS] <COMMAND>
//!
//! Commands:
//!   templates     List available and built-in templates
//!   paper-sizes   List paper sizes with pixel dimensions
//!   resolve       Print the chart configuration for a template and paper size
//!   validate      Check a `timestamp,value` CSV file against plotting requirements
//!
//! Set `RUST_LOG=info` to see template loading diagnostics.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use climatevis::validation::{summary_to_toml, validation_summary};
use climatevis::{ClimateVis, ClimateVisConfig, PaperSize, TimeSeries};

#[derive(Parser)]
#[command(name = "climatevis")]
#[command(about = "Chart templates and input checks for weather data plots")]
struct Cli {
    /// Read built-in templates from this directory instead of the bundled copies
    #[arg(short, long, global = true)]
    template_dir: Option<PathBuf>,

    /// Extra template files to register, as NAME=PATH
    #[arg(short, long = "load", global = true, value_parser = parse_named_path)]
    load: Vec<(String, PathBuf)>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available and built-in templates
    Templates,

    /// List paper sizes with pixel dimensions
    PaperSizes,

    /// Print the chart configuration for a template and paper size as TOML
    Resolve {
        template: String,
        #[arg(default_value = "A4_LANDSCAPE")]
        paper_size: String,
    },

    /// Check a CSV file with `timestamp` and `value` columns against plotting requirements
    Validate {
        input: PathBuf,
        #[arg(long, default_value = "base")]
        template: String,
        #[arg(long, default_value = "A4_LANDSCAPE")]
        paper_size: String,
        /// Series name used in messages
        #[arg(long)]
        name: Option<String>,
        /// Series unit
        #[arg(long)]
        unit: Option<String>,
        /// Fail instead of warning when name or unit is missing
        #[arg(long)]
        strict: bool,
        /// Print a per-series summary as TOML after validating
        #[arg(long)]
        summary: bool,
    },
}

fn parse_named_path(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got '{}'", s)),
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = ClimateVisConfig::new();
    if let Some(dir) = &cli.template_dir {
        config = config.with_template_dir(dir.clone());
    }
    let vis = ClimateVis::new(config);

    for (name, reason) in vis.load_report().fallbacks() {
        eprintln!("Warning: template '{}' uses built-in fallback: {}", name, reason);
    }

    for (name, path) in &cli.load {
        if let Err(e) = vis.load_template_file(path, name) {
            eprintln!("Error loading template '{}' from '{}': {}", name, path.display(), e);
            std::process::exit(1);
        }
    }

    match cli.command {
        Command::Templates => print_templates(&vis),
        Command::PaperSizes => print_paper_sizes(),
        Command::Resolve {
            template,
            paper_size,
        } => match vis.resolve(&template, &paper_size) {
            Ok(chart) => match chart.to_toml() {
                Ok(text) => print!("{}", text),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Command::Validate {
            input,
            template,
            paper_size,
            name,
            unit,
            strict,
            summary,
        } => {
            let mut series = match TimeSeries::from_csv_path(&input) {
                Ok(series) => series,
                Err(e) => {
                    eprintln!("Error reading file '{}': {}", input.display(), e);
                    std::process::exit(1);
                }
            };
            series.name = name;
            series.unit = unit;

            let series = [series];
            match vis.validate_plot(&series, &template, &paper_size, "validate", strict) {
                Ok(paper) => {
                    let (w, h) = paper.dimensions();
                    println!("OK: '{}' on {} ({}x{} px)", template, paper, w, h);
                    if summary {
                        match summary_to_toml(&validation_summary(&series)) {
                            Ok(text) => print!("{}", text),
                            Err(e) => {
                                eprintln!("Error: {}", e);
                                std::process::exit(1);
                            }
                        }
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn print_templates(vis: &ClimateVis) {
    let builtin = vis.get_builtin_template_names();
    for name in vis.get_available_templates() {
        let marker = if builtin.iter().any(|b| *b == name) {
            match vis.load_report().get(&name) {
                Some(outcome) if outcome.is_fallback() => " (built-in, fallback)",
                _ => " (built-in)",
            }
        } else {
            ""
        };
        println!("{}{}", name, marker);
    }
}

fn print_paper_sizes() {
    for paper in PaperSize::ALL {
        let (w, h) = paper.dimensions();
        println!("{:<14} {:>5} x {:<5}", paper.name(), w, h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_path() {
        let (name, path) = parse_named_path("dark=/tmp/dark.toml").expect("Should parse");
        assert_eq!(name, "dark");
        assert_eq!(path, PathBuf::from("/tmp/dark.toml"));
    }

    #[test]
    fn test_parse_named_path_rejects_missing_parts() {
        assert!(parse_named_path("dark").is_err());
        assert!(parse_named_path("=/tmp/dark.toml").is_err());
        assert!(parse_named_path("dark=").is_err());
    }

    #[test]
    fn test_cli_parses_validate_with_load() {
        let cli = Cli::try_parse_from([
            "climatevis",
            "--load",
            "dark=dark.toml",
            "validate",
            "series.csv",
            "--paper-size",
            "A3_PORTRAIT",
            "--summary",
        ])
        .expect("Should parse");
        assert_eq!(cli.load, vec![("dark".to_string(), PathBuf::from("dark.toml"))]);
        match cli.command {
            Command::Validate {
                paper_size,
                template,
                summary,
                ..
            } => {
                assert_eq!(paper_size, "A3_PORTRAIT");
                assert_eq!(template, "base");
                assert!(summary);
            }
            _ => panic!("expected validate"),
        }
    }
}
