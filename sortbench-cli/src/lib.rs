#![warn(missing_docs)]
//! SortBench CLI Library
//!
//! Configuration, planning, the timing-executable build step, the trial loop
//! and output rendering behind the `sortbench` binary.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     sortbench_cli::run()
//! }
//! ```

mod artifact;
mod config;
mod executor;
mod planner;

pub use artifact::{BuildError, BuildState, ensure_built, remove_artifact};
pub use config::*;
pub use executor::{ExecutionConfig, Executor, TrialError, TrialSummary, format_human_output};
pub use planner::{ExecutionPlan, build_plan};

use clap::{Parser, Subcommand};
use regex::Regex;
use sortbench_corpus::TestClass;
use sortbench_exchange::{CommandRunner, Exchange, ProcessRunner};
use sortbench_report::{
    Aggregator, OutputFormat, SummaryTable, generate_csv_report, generate_json_report,
};
use sortbench_store::{MeasurementStore, Schema};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// SortBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "sortbench")]
#[command(author, version, about = "SortBench - sorting algorithm benchmark harness")]
pub struct Cli {
    /// Optional subcommand; defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter test classes by regex pattern on their table name
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Configuration file (default: discover sortbench.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Generated inputs per test class
    #[arg(long)]
    pub inputs: Option<usize>,

    /// Round-trips per generated input
    #[arg(long)]
    pub repetitions: Option<usize>,

    /// Fixed RNG seed for reproducible inputs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory holding the measurement tables
    #[arg(long)]
    pub tests_dir: Option<PathBuf>,

    /// Timing executable (also the build artifact)
    #[arg(long)]
    pub executable: Option<PathBuf>,

    /// Output format: human, json, csv
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Build if needed, run trials, then aggregate (default)
    Run,
    /// Run trials without aggregating
    Trials,
    /// Aggregate existing measurement tables
    Analyze,
    /// Compile the timing executable
    Build,
    /// Remove the empty scratch directory and the compiled executable
    Clean,
    /// List the planned test classes
    List,
    /// Write a default sortbench.toml
    Init,
}

/// Run the SortBench CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the SortBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    let filter = if cli.verbose {
        "sortbench=debug"
    } else {
        "sortbench=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.unwrap_or(Commands::Run);
    if command == Commands::Init {
        return init_config();
    }

    let config = resolve_config(&cli)?;

    let format: OutputFormat = match cli.format.as_deref().unwrap_or(&config.output.format).parse() {
        Ok(format) => format,
        Err(e) => {
            warn!("{}; falling back to human output", e);
            OutputFormat::Human
        }
    };

    let filter_re = Regex::new(&cli.filter)?;
    let plan = build_plan(TestClass::ALL, Some(&filter_re));

    match command {
        Commands::List => list_classes(&config, &plan),
        Commands::Build => {
            build_executable(&config)?;
            Ok(())
        }
        Commands::Clean => clean_up(&config),
        Commands::Analyze => {
            let summary = analyze(&config, &plan.classes)?;
            emit(&cli, &render(format, &summary, None)?)
        }
        Commands::Trials => {
            let trials = run_trials(&config, &plan.classes, CommandRunner, true)?;
            println!(
                "Trials: {}  Succeeded: {}  Failed: {}  Inexact rows: {}",
                trials.attempted, trials.succeeded, trials.failed, trials.inexact_rows
            );
            check_trials(&trials)
        }
        Commands::Run => {
            if plan.is_empty() {
                println!("No test classes match '{}'.", cli.filter);
                return Ok(());
            }
            build_executable(&config)?;
            let trials = run_trials(&config, &plan.classes, CommandRunner, true)?;
            let summary = analyze(&config, &plan.classes)?;
            emit(&cli, &render(format, &summary, Some(&trials))?)?;
            check_trials(&trials)
        }
        Commands::Init => init_config(),
    }
}

/// Layer configuration: file (explicit or discovered) → CLI overrides, then validate.
pub fn resolve_config(cli: &Cli) -> anyhow::Result<SortbenchConfig> {
    let mut config = match &cli.config {
        Some(path) => SortbenchConfig::load(path)?,
        None => SortbenchConfig::discover().unwrap_or_default(),
    };

    if let Some(inputs) = cli.inputs {
        config.harness.inputs_per_class = inputs;
    }
    if let Some(repetitions) = cli.repetitions {
        config.harness.repetitions = repetitions;
    }
    if cli.seed.is_some() {
        config.harness.seed = cli.seed;
    }
    if let Some(ref dir) = cli.tests_dir {
        config.paths.tests_dir = dir.clone();
    }
    if let Some(ref executable) = cli.executable {
        config.build.artifact = executable.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Measurement store described by `config`
pub fn measurement_store(config: &SortbenchConfig) -> MeasurementStore {
    MeasurementStore::new(
        &config.paths.tests_dir,
        Schema::measurement(&config.harness.algorithms),
    )
}

/// Run every trial for `classes`, invoking the timing executable through `runner`.
pub fn run_trials<R: ProcessRunner>(
    config: &SortbenchConfig,
    classes: &[TestClass],
    runner: R,
    show_progress: bool,
) -> anyhow::Result<TrialSummary> {
    let exchange = Exchange::new(&config.paths.scratch_dir, &config.build.artifact, runner);
    let store = measurement_store(config);

    let exec_config = ExecutionConfig {
        inputs_per_class: config.harness.inputs_per_class,
        repetitions: config.harness.repetitions,
        param_range: config.harness.param_range(),
        seed: config.harness.seed,
        show_progress,
    };

    let mut executor = Executor::new(exec_config, &exchange, &store);
    let summary = executor.execute(classes)?;
    exchange.clear_scratch()?;

    info!(
        attempted = summary.attempted,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "trials finished"
    );
    Ok(summary)
}

/// Rebuild the summary table for `classes` from the measurement tables.
pub fn analyze(config: &SortbenchConfig, classes: &[TestClass]) -> anyhow::Result<SummaryTable> {
    let store = measurement_store(config);
    let aggregator = Aggregator::new(&store, &config.harness.algorithms, &config.paths.results_name);
    let summary = aggregator.run(classes)?;
    info!(path = %aggregator.summary_path().display(), "summary written");
    Ok(summary)
}

/// Render a summary in the requested format
pub fn render(
    format: OutputFormat,
    summary: &SummaryTable,
    trials: Option<&TrialSummary>,
) -> anyhow::Result<String> {
    let output = match format {
        OutputFormat::Json => generate_json_report(summary)?,
        OutputFormat::Csv => generate_csv_report(summary)?,
        OutputFormat::Human => format_human_output(summary, trials),
    };
    Ok(output)
}

/// Remove the scratch directory (if empty) and the compiled executable.
pub fn clean_up(config: &SortbenchConfig) -> anyhow::Result<()> {
    let exchange = Exchange::new(&config.paths.scratch_dir, &config.build.artifact, CommandRunner);
    if exchange.clear_scratch()? {
        println!("Removed {}", config.paths.scratch_dir.display());
    }
    if remove_artifact(&config.build.artifact)? {
        println!("Removed {}", config.build.artifact.display());
    }
    Ok(())
}

fn build_executable(config: &SortbenchConfig) -> anyhow::Result<BuildState> {
    let state = BuildState::detect(&config.build.artifact);
    Ok(ensure_built(&config.build, state, &CommandRunner)?)
}

fn check_trials(trials: &TrialSummary) -> anyhow::Result<()> {
    if trials.all_failed() {
        anyhow::bail!("all {} trials failed", trials.attempted);
    }
    if trials.failed > 0 {
        eprintln!("\n{} of {} trial(s) failed", trials.failed, trials.attempted);
    }
    Ok(())
}

fn emit(cli: &Cli, output: &str) -> anyhow::Result<()> {
    if let Some(ref path) = cli.output {
        let mut file = std::fs::File::create(path)?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }
    Ok(())
}

fn list_classes(config: &SortbenchConfig, plan: &ExecutionPlan) -> anyhow::Result<()> {
    println!("SortBench Plan:");

    let store = measurement_store(config);
    for class in &plan.classes {
        println!("├── {} ({})", class.table_name(), store.table_path(*class).display());
    }
    println!("{} test classes found.", plan.classes.len());
    println!("Algorithms: {}", config.harness.algorithms.join(", "));
    println!(
        "Trials per class: {} inputs x {} repetitions",
        config.harness.inputs_per_class, config.harness.repetitions
    );

    Ok(())
}

fn init_config() -> anyhow::Result<()> {
    let path = PathBuf::from(CONFIG_FILE);
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    std::fs::write(&path, SortbenchConfig::default_toml())?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["sortbench"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.filter, ".*");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_subcommand_and_overrides() {
        let cli = Cli::parse_from([
            "sortbench",
            "--inputs",
            "3",
            "--repetitions",
            "2",
            "--seed",
            "9",
            "--tests-dir",
            "out",
            "Random",
            "trials",
        ]);
        assert_eq!(cli.command, Some(Commands::Trials));
        assert_eq!(cli.filter, "Random");

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.harness.inputs_per_class, 3);
        assert_eq!(config.harness.repetitions, 2);
        assert_eq!(config.harness.seed, Some(9));
        assert_eq!(config.paths.tests_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_resolve_config_rejects_zero_repetitions() {
        let cli = Cli::parse_from(["sortbench", "--repetitions", "0"]);
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn test_check_trials() {
        let all_failed = TrialSummary {
            attempted: 2,
            failed: 2,
            ..TrialSummary::default()
        };
        assert!(check_trials(&all_failed).is_err());

        let partial = TrialSummary {
            attempted: 2,
            succeeded: 1,
            failed: 1,
            inexact_rows: 0,
        };
        assert!(check_trials(&partial).is_ok());
    }
}
