mod action;
mod error;
mod goal;
mod graph;
mod heuristic;
mod planner;
mod rule;
mod search;
mod state;
mod visualizer;

pub use action::{Recipe, ZeroConsumeGating};
pub use error::{PlanError, Result};
pub use goal::Goal;
pub use graph::{ActionGraph, Successor};
pub use heuristic::{
    BalancedPair, CraftingHeuristic, GatherPenalty, Heuristic, ToolFamily, ZeroHeuristic,
};
pub use planner::{plan, Planner, PlannerConfig};
pub use rule::{Rule, RuleSet};
pub use search::{BestFirstSearch, Plan, PlanStep, SearchStatus};
pub use state::{InventoryState, ItemUniverse};
pub use visualizer::PlanVisualizer;
