use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use apo_engine::aggregate::Aggregator;
use apo_engine::config::{load_config, validate_config, Config};
use apo_engine::emerging;
use apo_engine::industry;
use apo_engine::occupation::Occupation;
use apo_engine::output;
use apo_engine::scoring::{self, AutomationFactor};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Static APO from the built-in phrase tables
    Static {
        /// Occupation JSON file
        occupation: PathBuf,
        /// Show how each item was scored
        #[arg(long)]
        explain: bool,
    },
    /// Dynamic APO blending configured external sources with the static model
    Analyze {
        /// Occupation JSON file
        occupation: PathBuf,
        /// Fail instead of falling back to the static model
        #[arg(long)]
        no_fallback: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score a single automation factor with the factor-weighted model
    Factor {
        /// Automation factor JSON file
        factor: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Adjust a score for the configured industry and region
    Industry {
        /// Score to adjust
        score: f64,
    },
    /// Emerging technologies worth watching for an occupation
    Emerging {
        #[arg(long)]
        industry: String,
        #[arg(long)]
        occupation: String,
        /// Task description to measure catalog impact against
        #[arg(long)]
        task: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "apo")]
#[command(about = "Automation potential scoring for occupations", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/apo-engine/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> T {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to read {} file {}: {}", what, path.display(), e);
            std::process::exit(EXIT_DATA);
        }
    };
    match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid {} JSON in {}: {}", what, path.display(), e);
            std::process::exit(EXIT_DATA);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("Failed to serialize result: {}", e);
            std::process::exit(EXIT_DATA);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();

    let config = match load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = output::should_use_colors();

    match cli.command {
        Commands::Static { occupation, explain } => {
            let occupation: Occupation = read_json(&occupation, "occupation");
            let scores = scoring::category_scores(&occupation);
            let overall = scoring::weighted_overall(&scores, &config.weights);

            println!("{}", output::format_static(&occupation, &scores, overall, use_colors));
            if explain {
                println!();
                println!("{}", output::format_explanation(&occupation, use_colors));
            }
        }
        Commands::Analyze {
            occupation,
            no_fallback,
            json,
        } => {
            let occupation: Occupation = read_json(&occupation, "occupation");
            run_analyze(&config, &occupation, no_fallback, json, use_colors).await;
        }
        Commands::Factor { factor, json } => {
            let factor: AutomationFactor = read_json(&factor, "factor");
            if let Err(errors) = scoring::validate_factor(&factor) {
                for error in errors {
                    tracing::warn!("{}", error);
                }
            }

            let result = scoring::enhanced::score(&factor, config.industry.as_ref());
            if json {
                print_json(&result);
            } else {
                println!("{}", output::format_factor(&factor, &result, use_colors));
            }
        }
        Commands::Industry { score } => {
            let Some(ref context) = config.industry else {
                eprintln!("No industry configured in config file.");
                eprintln!("Add an industry section to ~/.config/apo-engine/config.yaml:");
                eprintln!("  industry:");
                eprintln!("    sector: Finance");
                eprintln!("    region: North America");
                eprintln!("    tech_adoption_rate: 70");
                eprintln!("    labor_market_factor: 50");
                std::process::exit(EXIT_CONFIG);
            };

            let adjusted = industry::adjusted_score(score, context);
            println!("{}", output::format_industry(context, score, adjusted, use_colors));
        }
        Commands::Emerging {
            industry,
            occupation,
            task,
        } => {
            let recommended = emerging::recommend_technologies(&industry, &occupation);
            let task_impact = task
                .as_deref()
                .map(|t| (t, emerging::impact(t, emerging::catalog())));
            println!(
                "{}",
                output::format_emerging(&industry, &occupation, &recommended, task_impact, use_colors)
            );
        }
    }

    tracing::debug!(elapsed = ?start_time.elapsed(), "done");
    std::process::exit(EXIT_SUCCESS);
}

async fn run_analyze(config: &Config, occupation: &Occupation, no_fallback: bool, json: bool, use_colors: bool) {
    let policy = match config.aggregator.call_policy() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let sources = config.build_sources();
    if sources.is_empty() {
        tracing::info!("no external sources configured");
    }

    let mut options = config.analyze_options();
    if no_fallback {
        options.fallback_to_static = false;
    }

    let aggregator = Aggregator::new(sources)
        .with_policy(policy)
        .with_weights(config.weights);

    match aggregator.analyze(occupation, &options).await {
        Ok(result) => {
            if json {
                print_json(&result);
            } else {
                println!("{}", output::format_dynamic(occupation, &result, use_colors));
            }
        }
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            std::process::exit(EXIT_DATA);
        }
    }
}
