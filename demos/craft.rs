//! Plans a crafting problem file and prints the result.
//!
//! ```text
//! RUST_LOG=info cargo run --example craft -- [problem.json] [time_budget_secs] [plan.dot]
//! ```

use craftplan::{CraftingHeuristic, PlanVisualizer, Planner, PlannerConfig, RuleSet};
use std::fs::File;
use std::process::ExitCode;
use std::time::Duration;

fn run() -> craftplan::Result<bool> {
    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/demos/crafting.json").to_string());
    let mut config = PlannerConfig::default();
    if let Some(secs) = args.next().and_then(|arg| arg.parse::<u64>().ok()) {
        config = config.with_time_budget(Duration::from_secs(secs));
    }
    let dot = args.next();

    let problem = RuleSet::from_reader(File::open(&path)?)?;
    println!("All items: {:?}", problem.items);
    println!("Initial inventory: {:?}", problem.initial);
    println!("Goal: {:?}", problem.goal);

    let planner = Planner::from_rule_set(&problem, config)?;
    let start = planner.state(&problem.initial)?;
    let goal = planner.goal(&problem.goal)?;

    match planner.plan(&start, &goal, &CraftingHeuristic::default()) {
        Ok(plan) => {
            println!("{}", plan);
            if let Some(dot) = dot {
                PlanVisualizer::new().visualize_plan(&plan, &dot)?;
                println!("Plan graph written to {}", dot);
            }
            Ok(true)
        }
        Err(err) if err.is_search_failure() => {
            println!("Failed to find a path from {}: {}", start, err);
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(2)
        }
    }
}
