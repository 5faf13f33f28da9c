use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relief_alloc::chart::BarChart;
use relief_alloc::monte_carlo::run_monte_carlo_comparison;
use relief_alloc::reporting::{
    coverage_stats_to_json, display_allocation, display_chart, display_comparison, display_coverage_stats,
    display_header, display_metrics, display_scenario, runs_to_json,
};
use relief_alloc::scenario::{random_scenario, RandomScenarioParams};
use relief_alloc::{allocate, compute_metrics, validate_request, Limits, Scenario, Strategy};

#[derive(Parser)]
#[command(name = "relief-alloc", about = "Distribute camp supplies across demand zones")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate supply with one strategy and report the result
    Run {
        #[command(flatten)]
        input: InputArgs,

        /// urgency, demand or roundrobin
        #[arg(short, long, default_value = "urgency")]
        strategy: Strategy,
    },

    /// Run every applicable strategy on the same scenario
    Compare {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Compare strategies over many random scenarios
    MonteCarlo(MonteCarloArgs),
}

#[derive(Args)]
struct InputArgs {
    /// JSON scenario file
    #[arg(short, long, conflicts_with_all = ["random", "two_resources"])]
    file: Option<PathBuf>,

    /// Use the built-in food and water sample camp
    #[arg(long)]
    two_resources: bool,

    /// Generate a random scenario with this many zones
    #[arg(long)]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Supply amount per resource, in resource order (repeat for each resource)
    #[arg(long)]
    supply: Vec<f64>,

    #[command(flatten)]
    limits: LimitArgs,

    /// Print the result as JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct LimitArgs {
    /// Upper bound for each zone's demand
    #[arg(long)]
    max_demand: Option<f64>,

    /// Upper bound for each zone's urgency
    #[arg(long)]
    max_urgency: Option<f64>,

    /// Upper bound for each resource's supply
    #[arg(long)]
    max_supply: Option<f64>,

    /// Upper bound for each zone's distance (unbounded by default)
    #[arg(long)]
    max_distance: Option<f64>,
}

impl LimitArgs {
    fn apply(&self, mut limits: Limits) -> Limits {
        if let Some(v) = self.max_demand {
            limits.max_demand = v;
        }
        if let Some(v) = self.max_urgency {
            limits.max_urgency = v;
        }
        if let Some(v) = self.max_supply {
            limits.max_supply = v;
        }
        if self.max_distance.is_some() {
            limits.max_distance = self.max_distance;
        }
        limits
    }
}

#[derive(Args)]
struct MonteCarloArgs {
    /// Number of random scenarios per strategy
    #[arg(short = 'n', long, default_value_t = 500)]
    scenarios: usize,

    /// Zones per scenario
    #[arg(long, default_value_t = 8)]
    zones: usize,

    /// Resource names; only urgency priority runs with more than one
    #[arg(long, default_value = "supply")]
    resource: Vec<String>,

    #[arg(long, default_value_t = 40.0)]
    mean_demand: f64,

    #[arg(long, default_value_t = 15.0)]
    std_dev_demand: f64,

    /// Supply as a fraction of total demand
    #[arg(long, default_value_t = 0.6)]
    supply_ratio: f64,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[command(flatten)]
    limits: LimitArgs,

    /// Print the statistics as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { input, strategy } => run(&input, strategy),
        Commands::Compare { input } => compare(&input),
        Commands::MonteCarlo(args) => monte_carlo(&args),
    }
}

fn load_scenario(input: &InputArgs) -> anyhow::Result<Scenario> {
    let mut scenario = if let Some(path) = &input.file {
        Scenario::from_file(path).with_context(|| format!("loading {}", path.display()))?
    } else if let Some(zone_count) = input.random {
        let resources = if input.two_resources {
            vec!["food".to_string(), "water".to_string()]
        } else {
            RandomScenarioParams::default().resources
        };
        let params = RandomScenarioParams {
            zone_count,
            limits: Limits::for_resources(resources.len()),
            resources,
            ..RandomScenarioParams::default()
        };
        random_scenario(&params, input.seed)?
    } else if input.two_resources {
        Scenario::sample_two_resource()
    } else {
        Scenario::sample_single()
    };

    if !input.supply.is_empty() {
        scenario = scenario.with_supply(&input.supply)?;
    }
    scenario.limits = input.limits.apply(scenario.limits);

    validate_request(&scenario.zones, &scenario.supply, &scenario.limits)?;
    Ok(scenario)
}

fn run(input: &InputArgs, strategy: Strategy) -> anyhow::Result<()> {
    let scenario = load_scenario(input)?;
    info!(strategy = %strategy, zones = scenario.zones.len(), "running allocation");

    let allocation = allocate(strategy, &scenario.zones, &scenario.supply)?;
    let metrics = compute_metrics(&allocation, &scenario.supply);

    if input.json {
        println!("{}", runs_to_json(&scenario.supply, &scenario.limits, &[(allocation, metrics)])?);
        return Ok(());
    }

    display_header("DISASTER RESOURCE ALLOCATION");
    display_scenario(&scenario.zones, &scenario.supply);
    display_allocation(&allocation);
    display_metrics(&metrics);
    display_chart(&BarChart::from_allocation(&allocation));

    Ok(())
}

fn compare(input: &InputArgs) -> anyhow::Result<()> {
    let scenario = load_scenario(input)?;

    let runs = Strategy::applicable(scenario.supply.len())
        .into_iter()
        .map(|strategy| -> anyhow::Result<_> {
            let allocation = allocate(strategy, &scenario.zones, &scenario.supply)?;
            let metrics = compute_metrics(&allocation, &scenario.supply);
            Ok((allocation, metrics))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    if input.json {
        println!("{}", runs_to_json(&scenario.supply, &scenario.limits, &runs)?);
        return Ok(());
    }

    display_scenario(&scenario.zones, &scenario.supply);
    display_comparison(&runs);
    Ok(())
}

fn monte_carlo(args: &MonteCarloArgs) -> anyhow::Result<()> {
    let params = RandomScenarioParams {
        zone_count: args.zones,
        resources: args.resource.clone(),
        mean_demand: args.mean_demand,
        std_dev_demand: args.std_dev_demand,
        supply_ratio: args.supply_ratio,
        limits: args.limits.apply(Limits::for_resources(args.resource.len())),
    };

    info!(scenarios = args.scenarios, zones = args.zones, "running monte carlo comparison");
    let stats = run_monte_carlo_comparison(&params, &Strategy::ALL, args.scenarios, args.seed)?;

    if args.json {
        println!("{}", coverage_stats_to_json(&stats)?);
    } else {
        display_coverage_stats(stats);
    }
    Ok(())
}
