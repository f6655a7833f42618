mod logging;

use std::fs;
use std::path::PathBuf;

use carpool_highs::HighsSolver;
use carpool_matching::{BuildOptions, ProblemInstance, RoutePlan, SolveOutcome, samples, solve};
use carpool_solver::SolverConfig;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about = "Car-sharing ride matching solved as a MILP")]
struct Cli {
    /// Tracing filter, overrides CARPOOL_TRACE (e.g. "debug" or "carpool_matching=trace")
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build, solve and print the driver routes
    Solve(SolveArgs),
    /// Write a sample instance as JSON
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct SolveArgs {
    /// Sample instance to solve
    #[arg(long, value_enum, default_value = "a")]
    scenario: Sample,

    /// JSON instance file; takes precedence over --scenario
    #[arg(long)]
    instance: Option<PathBuf>,

    /// Emit every row of the literal formulation instead of fixing forbidden arcs
    #[arg(long)]
    dense: bool,

    /// Solver time limit in seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Relative MIP gap
    #[arg(long)]
    mip_gap: Option<f64>,

    /// Solver thread count
    #[arg(long)]
    threads: Option<u32>,

    /// Show HiGHS output on the console
    #[arg(long)]
    solver_output: bool,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[arg(long, value_enum, default_value = "a")]
    scenario: Sample,

    /// Output path; stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum Sample {
    /// One driver, one passenger
    A,
    /// Two single-seat drivers, three passengers
    B,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct SolveReport<'a> {
    status: &'static str,
    served: Vec<usize>,
    plan: Option<&'a RoutePlan>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref())?;
    match cli.command {
        Command::Solve(args) => solve_command(args),
        Command::Export(args) => export_command(args),
    }
}

fn sample_instance(sample: Sample) -> Result<ProblemInstance, Box<dyn std::error::Error>> {
    let instance = match sample {
        Sample::A => samples::scenario_a()?,
        Sample::B => samples::scenario_b()?,
    };
    Ok(instance)
}

fn load_instance(args: &SolveArgs) -> Result<ProblemInstance, Box<dyn std::error::Error>> {
    match &args.instance {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => sample_instance(args.scenario),
    }
}

fn solver_config(args: &SolveArgs) -> SolverConfig {
    let mut config = SolverConfig::new().with_log_to_console(args.solver_output);
    if let Some(limit) = args.time_limit {
        config = config.with_time_limit(limit);
    }
    if let Some(gap) = args.mip_gap {
        config = config.with_mip_gap(gap);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    config
}

fn solve_command(args: SolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let instance = load_instance(&args)?;
    let options = BuildOptions::new()
        .with_prune_forbidden_arcs(!args.dense)
        .with_solver_config(solver_config(&args));

    tracing::info!(
        component = "cli",
        operation = "solve",
        drivers = instance.n_drivers(),
        passengers = instance.n_passengers(),
        dense = args.dense,
        "solving instance"
    );
    let outcome = solve(&instance, HighsSolver::new(), &options)?;
    match args.format {
        OutputFormat::Json => {
            let plan = outcome.plan();
            let report = SolveReport {
                status: outcome.status().as_str(),
                served: plan.map(RoutePlan::served_passengers).unwrap_or_default(),
                plan,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => match &outcome {
            SolveOutcome::Solved(plan) => println!("{plan}"),
            SolveOutcome::Infeasible(status) => println!(
                "The model cannot be solved because it is infeasible or unbounded ({status})"
            ),
            SolveOutcome::Unexpected(status) => {
                println!("Optimization was stopped with status {status}")
            }
        },
    }
    Ok(())
}

fn export_command(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let instance = sample_instance(args.scenario)?;
    let json = serde_json::to_string_pretty(&instance)?;
    match args.output {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
