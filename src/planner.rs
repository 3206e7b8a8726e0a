//! # Planner
//!
//! The planner is the entry point of the crate. It owns:
//! - the item universe every state is defined over
//! - the recipes compiled from the problem's rules
//! - the [`PlannerConfig`] bounding each search
//!
//! Rules are compiled once, when the planner is built; malformed rules are
//! rejected there rather than half-way through a search. Each call to
//! [`Planner::plan`] then runs an independent best-first search, so one
//! planner can answer many `(start, goal, heuristic)` queries.
//!
//! ## Basic Usage
//!
//! ```
//! use craftplan::{ItemUniverse, Planner, Rule, ZeroHeuristic};
//! use std::collections::BTreeMap;
//!
//! // Step 1: describe the items and how they can be produced
//! let universe = ItemUniverse::new(["wood", "plank", "stick"]);
//! let rules = vec![
//!     ("punch for wood".to_string(), Rule::new(4.0).produces("wood", 1)),
//!     ("craft plank".to_string(), Rule::new(1.0).consumes("wood", 1).produces("plank", 4)),
//!     ("craft stick".to_string(), Rule::new(1.0).consumes("plank", 2).produces("stick", 4)),
//! ];
//! let planner = Planner::new(universe, rules).unwrap();
//!
//! // Step 2: build the start state and the goal
//! let start = planner.state(&BTreeMap::new()).unwrap();
//! let goal = planner
//!     .goal(&BTreeMap::from([("stick".to_string(), 1)]))
//!     .unwrap();
//!
//! // Step 3: search
//! let plan = planner.plan(&start, &goal, &ZeroHeuristic).unwrap();
//! let actions: Vec<_> = plan.actions().collect();
//! assert_eq!(actions, ["punch for wood", "craft plank", "craft stick"]);
//! assert_eq!(plan.cost, 6.0);
//! ```

use crate::graph::ActionGraph;
use crate::search::{BestFirstSearch, Plan};
use crate::{
    Goal, Heuristic, InventoryState, ItemUniverse, Recipe, Result, Rule, RuleSet,
    ZeroConsumeGating,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Limits and policies applied to every search a [`Planner`] runs.
///
/// ```
/// use craftplan::{PlannerConfig, ZeroConsumeGating};
/// use std::time::Duration;
///
/// let config = PlannerConfig::default()
///     .with_time_budget(Duration::from_secs(30))
///     .with_zero_consume_gating(ZeroConsumeGating::RequirePresence);
/// assert_eq!(config.time_budget, Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Wall-clock budget for one search
    pub time_budget: Duration,
    /// How zero-amount `Consumes` clauses gate recipe applicability
    pub zero_consume_gating: ZeroConsumeGating,
    /// Expansions between progress log lines; 0 disables them
    pub progress_interval: usize,
}

impl PlannerConfig {
    pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(200);

    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    pub fn with_zero_consume_gating(mut self, gating: ZeroConsumeGating) -> Self {
        self.zero_consume_gating = gating;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            time_budget: Self::DEFAULT_TIME_BUDGET,
            zero_consume_gating: ZeroConsumeGating::default(),
            progress_interval: 10_000,
        }
    }
}

/// Planner that finds low-cost recipe sequences reaching a goal inventory.
#[derive(Debug, Clone)]
pub struct Planner {
    universe: Arc<ItemUniverse>,
    recipes: Vec<Recipe>,
    config: PlannerConfig,
}

impl Planner {
    /// Compiles `rules` against `universe` with the default configuration.
    ///
    /// # Errors
    ///
    /// * [`PlanError::UnknownItem`](crate::PlanError::UnknownItem) - a rule mentions an item outside `universe`
    /// * [`PlanError::InvalidRecipeCost`](crate::PlanError::InvalidRecipeCost) - a rule's time is not positive
    pub fn new<I>(universe: ItemUniverse, rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Rule)>,
    {
        Self::with_config(universe, rules, PlannerConfig::default())
    }

    /// Compiles `rules` against `universe` with an explicit configuration.
    pub fn with_config<I>(universe: ItemUniverse, rules: I, config: PlannerConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Rule)>,
    {
        let universe = Arc::new(universe);
        let recipes = rules
            .into_iter()
            .map(|(name, rule)| {
                Recipe::compile(name, &rule, &universe, config.zero_consume_gating)
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "compiled {} recipes over {} items",
            recipes.len(),
            universe.len()
        );
        for recipe in &recipes {
            log::trace!(
                "recipe '{}' (cost {}): {}",
                recipe.name(),
                recipe.cost(),
                recipe.describe(&universe)
            );
        }

        Ok(Self {
            universe,
            recipes,
            config,
        })
    }

    /// Builds a planner from a loaded problem file.
    pub fn from_rule_set(rule_set: &RuleSet, config: PlannerConfig) -> Result<Self> {
        Self::with_config(
            rule_set.universe(),
            rule_set
                .recipes
                .iter()
                .map(|(name, rule)| (name.clone(), rule.clone())),
            config,
        )
    }

    pub fn universe(&self) -> &Arc<ItemUniverse> {
        &self.universe
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Builds a state over this planner's universe from sparse quantities.
    pub fn state(&self, initial: &BTreeMap<String, u64>) -> Result<InventoryState> {
        InventoryState::with_quantities(self.universe.clone(), initial)
    }

    /// Compiles a goal inventory over this planner's universe.
    pub fn goal(&self, goal: &BTreeMap<String, u64>) -> Result<Goal> {
        Goal::compile(goal, &self.universe)
    }

    /// Searches for a plan from `start` to a state satisfying `goal`.
    ///
    /// # Returns
    ///
    /// * `Ok(Plan)` - the plan; empty when `start` already satisfies `goal`
    /// * `Err(PlanError::TimeBudgetExceeded)` - the configured budget ran out
    /// * `Err(PlanError::FrontierExhausted)` - the goal is unreachable under
    ///   these rules and this heuristic's pruning
    /// * `Err(PlanError::UniverseMismatch)` - `start` or `goal` was built over
    ///   another universe
    pub fn plan<H>(&self, start: &InventoryState, goal: &Goal, heuristic: &H) -> Result<Plan>
    where
        H: Heuristic + ?Sized,
    {
        self.universe
            .ensure_same(start.universe().names(), "start state")?;
        self.universe.ensure_same(goal.universe_names(), "goal")?;

        log::info!("planning from {} towards {}", start, goal);
        let search = BestFirstSearch::new(
            ActionGraph::new(&self.recipes),
            start.clone(),
            goal,
            heuristic,
            self.config.time_budget,
        )?
        .with_progress_interval(self.config.progress_interval);

        let started = std::time::Instant::now();
        let result = search.run();
        match &result {
            Ok(plan) => log::info!(
                "plan found in {:?}: {} actions, total cost {}",
                started.elapsed(),
                plan.len(),
                plan.cost
            ),
            Err(err) => log::warn!("no plan from {}: {}", start, err),
        }
        result
    }
}

/// One-shot planning over raw problem data.
///
/// Compiles `rules` over `items`, builds the initial state and goal, and runs
/// a single search bounded by `time_budget`.
///
/// ```
/// use craftplan::{plan, Rule, ZeroHeuristic};
/// use std::collections::BTreeMap;
/// use std::time::Duration;
///
/// let rules = [("craft plank".to_string(), Rule::new(1.0).consumes("wood", 1).produces("plank", 4))];
/// let found = plan(
///     rules,
///     ["wood", "plank"],
///     &BTreeMap::from([("wood".to_string(), 5)]),
///     &BTreeMap::from([("plank".to_string(), 4)]),
///     &ZeroHeuristic,
///     Duration::from_secs(10),
/// )
/// .unwrap();
/// assert_eq!(found.len(), 1);
/// ```
pub fn plan<R, I, S, H>(
    rules: R,
    items: I,
    initial: &BTreeMap<String, u64>,
    goal: &BTreeMap<String, u64>,
    heuristic: &H,
    time_budget: Duration,
) -> Result<Plan>
where
    R: IntoIterator<Item = (String, Rule)>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
    H: Heuristic + ?Sized,
{
    let config = PlannerConfig::default().with_time_budget(time_budget);
    let planner = Planner::with_config(ItemUniverse::new(items), rules, config)?;
    let start = planner.state(initial)?;
    let goal = planner.goal(goal)?;
    planner.plan(&start, &goal, heuristic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CraftingHeuristic, PlanError, ZeroHeuristic};

    fn quantities(items: &[(&str, u64)]) -> BTreeMap<String, u64> {
        items
            .iter()
            .map(|&(item, quantity)| (item.to_string(), quantity))
            .collect()
    }

    fn planks() -> Planner {
        Planner::new(
            ItemUniverse::new(["wood", "plank"]),
            [(
                "craft plank".to_string(),
                Rule::new(1.0).consumes("wood", 1).produces("plank", 4),
            )],
        )
        .unwrap()
    }

    #[test]
    fn test_simple_plan() {
        let planner = planks();
        let start = planner.state(&quantities(&[("wood", 5)])).unwrap();
        let goal = planner.goal(&quantities(&[("plank", 4)])).unwrap();

        let plan = planner.plan(&start, &goal, &ZeroHeuristic).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.steps[0].action, "craft plank");
        assert_eq!(plan.steps[0].state, start);
        assert_eq!(plan.final_state.get("wood"), 4);
        assert_eq!(plan.final_state.get("plank"), 4);
        assert_eq!(plan.cost, 1.0);
    }

    #[test]
    fn test_goal_already_satisfied() {
        let planner = planks();
        let start = planner.state(&quantities(&[("plank", 4)])).unwrap();
        let goal = planner.goal(&quantities(&[("plank", 4)])).unwrap();

        let plan = planner.plan(&start, &goal, &ZeroHeuristic).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.cost, 0.0);
        assert_eq!(plan.final_state, start);
    }

    #[test]
    fn test_no_plan_found() {
        let planner = planks();
        let start = planner.state(&quantities(&[("wood", 1)])).unwrap();
        let goal = planner.goal(&quantities(&[("plank", 8)])).unwrap();

        let result = planner.plan(&start, &goal, &ZeroHeuristic);
        assert!(matches!(result, Err(PlanError::FrontierExhausted { .. })));
    }

    #[test]
    fn test_plan_with_multiple_paths() {
        let planner = Planner::new(
            ItemUniverse::new(["start", "goal"]),
            [
                ("slow".to_string(), Rule::new(5.0).requires("start").produces("goal", 1)),
                ("fast".to_string(), Rule::new(1.0).requires("start").produces("goal", 1)),
            ],
        )
        .unwrap();
        let start = planner.state(&quantities(&[("start", 1)])).unwrap();
        let goal = planner.goal(&quantities(&[("goal", 1)])).unwrap();

        let plan = planner.plan(&start, &goal, &CraftingHeuristic::default()).unwrap();
        assert_eq!(plan.steps[0].action, "fast");
    }

    #[test]
    fn test_invalid_rule_rejected_at_construction() {
        let result = Planner::new(
            ItemUniverse::new(["wood"]),
            [("craft plank".to_string(), Rule::new(1.0).produces("plank", 4))],
        );
        assert!(matches!(result, Err(PlanError::UnknownItem { .. })));
    }

    #[test]
    fn test_start_from_foreign_universe_rejected() {
        let planner = planks();
        let foreign = InventoryState::new(Arc::new(ItemUniverse::new(["wood", "plank", "ore"])));
        let goal = planner.goal(&quantities(&[("plank", 4)])).unwrap();
        let result = planner.plan(&foreign, &goal, &ZeroHeuristic);
        assert!(matches!(
            result,
            Err(PlanError::UniverseMismatch { ref context }) if context == "start state"
        ));

        // Same items in another order is still a different universe
        let reordered = InventoryState::new(Arc::new(ItemUniverse::new(["plank", "wood"])));
        let result = planner.plan(&reordered, &goal, &ZeroHeuristic);
        assert!(matches!(result, Err(PlanError::UniverseMismatch { .. })));
    }

    #[test]
    fn test_goal_from_foreign_universe_rejected() {
        let planner = planks();
        let start = planner.state(&quantities(&[("wood", 5)])).unwrap();
        let wanted = quantities(&[("plank", 4)]);

        let larger = Goal::compile(&wanted, &ItemUniverse::new(["a", "b", "c", "plank"])).unwrap();
        let result = planner.plan(&start, &larger, &ZeroHeuristic);
        assert!(matches!(
            result,
            Err(PlanError::UniverseMismatch { ref context }) if context == "goal"
        ));

        let reordered = Goal::compile(&wanted, &ItemUniverse::new(["plank", "wood"])).unwrap();
        let result = planner.plan(&start, &reordered, &ZeroHeuristic);
        assert!(matches!(
            result,
            Err(PlanError::UniverseMismatch { ref context }) if context == "goal"
        ));
    }

    #[test]
    fn test_config_is_kept() {
        let config = PlannerConfig::default()
            .with_time_budget(Duration::from_secs(3))
            .with_progress_interval(0);
        let planner = Planner::with_config(ItemUniverse::new(["wood"]), Vec::new(), config).unwrap();
        assert_eq!(planner.config(), &config);
        assert!(planner.recipes().is_empty());
    }

    #[test]
    fn test_config_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.time_budget, Duration::from_secs(200));
        assert_eq!(config.zero_consume_gating, ZeroConsumeGating::Ungated);
        assert_eq!(config.progress_interval, 10_000);
    }
}
