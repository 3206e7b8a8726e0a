use crate::graph::ActionGraph;
use crate::{Goal, Heuristic, InventoryState, PlanError, Result};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::time::{Duration, Instant};

/// Where a [`BestFirstSearch`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Running,
    GoalFound,
    TimeExceeded,
    FrontierExhausted,
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        self != SearchStatus::Running
    }
}

/// One step of a plan: the state the action was applied to, and the action.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanStep {
    pub state: InventoryState,
    pub action: String,
}

/// A sequence of actions leading from a start state to a goal state.
///
/// An empty plan is a success: the start state already satisfied the goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
    pub final_state: InventoryState,
    pub cost: f64,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.action.as_str())
    }
}

/// Prints each step as its state snapshot followed by the action, then the
/// final state and the total cost.
impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "\t{}", step.state)?;
            writeln!(f, "{}", step.action)?;
        }
        writeln!(f, "\t{}", self.final_state)?;
        write!(f, "{} actions, total cost {}", self.steps.len(), self.cost)
    }
}

#[derive(Debug)]
struct FrontierEntry {
    priority: f64,
    cost: f64,
    state: InventoryState,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the BinaryHeap pops the lowest priority, then the lowest state
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.state.cmp(&self.state))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best-first search over the crafting graph, driven one iteration at a time.
///
/// The frontier is ordered by `cost_to_reach + heuristic`. A state may sit in
/// the frontier several times with different costs; entries whose cost is
/// worse than the best recorded one are skipped when popped. Successors the
/// heuristic scores as infinite are never recorded.
///
/// Most callers use [`Planner::plan`](crate::Planner::plan), which runs a
/// search to completion.
pub struct BestFirstSearch<'a, H: ?Sized> {
    graph: ActionGraph<'a>,
    goal: &'a Goal,
    heuristic: &'a H,
    frontier: BinaryHeap<FrontierEntry>,
    cost_to_reach: HashMap<InventoryState, f64>,
    predecessor: HashMap<InventoryState, (InventoryState, usize)>,
    started: Instant,
    time_budget: Duration,
    expanded: usize,
    progress_interval: usize,
    status: SearchStatus,
    found: Option<InventoryState>,
}

impl<'a, H> BestFirstSearch<'a, H>
where
    H: Heuristic + ?Sized,
{
    /// Seeds a search with `start` at cost zero. The time budget starts now.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::UniverseMismatch`] if `goal` was compiled over a
    /// different universe than `start`.
    pub fn new(
        graph: ActionGraph<'a>,
        start: InventoryState,
        goal: &'a Goal,
        heuristic: &'a H,
        time_budget: Duration,
    ) -> Result<Self> {
        start
            .universe()
            .ensure_same(goal.universe_names(), "goal")?;

        let mut cost_to_reach = HashMap::new();
        cost_to_reach.insert(start.clone(), 0.0);
        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry {
            priority: 0.0,
            cost: 0.0,
            state: start,
        });

        Ok(Self {
            graph,
            goal,
            heuristic,
            frontier,
            cost_to_reach,
            predecessor: HashMap::new(),
            started: Instant::now(),
            time_budget,
            expanded: 0,
            progress_interval: 0,
            status: SearchStatus::Running,
            found: None,
        })
    }

    /// Emits a progress `debug!` line every `interval` expansions (0 disables).
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Number of states expanded so far.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Best known cost to reach `state`, if it has been reached.
    pub fn cost_to_reach(&self, state: &InventoryState) -> Option<f64> {
        self.cost_to_reach.get(state).copied()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Runs a single iteration of the search loop and returns the new status.
    ///
    /// Calling `step` after the search reached a terminal status is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NegativeQuantity`] if a recipe transition breaks
    /// the non-negative quantity invariant.
    pub fn step(&mut self) -> Result<SearchStatus> {
        if self.status.is_terminal() {
            return Ok(self.status);
        }

        if self.started.elapsed() >= self.time_budget {
            self.status = SearchStatus::TimeExceeded;
            return Ok(self.status);
        }

        let Some(entry) = self.frontier.pop() else {
            self.status = SearchStatus::FrontierExhausted;
            return Ok(self.status);
        };

        let best = self.cost_to_reach.get(&entry.state).copied();
        if best.is_some_and(|best| entry.cost > best) {
            return Ok(self.status);
        }

        if self.goal.is_satisfied(&entry.state) {
            self.found = Some(entry.state);
            self.status = SearchStatus::GoalFound;
            return Ok(self.status);
        }

        self.expand(entry)?;
        Ok(self.status)
    }

    fn expand(&mut self, entry: FrontierEntry) -> Result<()> {
        self.expanded += 1;
        if self.progress_interval > 0 && self.expanded % self.progress_interval == 0 {
            log::debug!(
                "expanded {} states in {:?}, frontier {}, best f {}",
                self.expanded,
                self.started.elapsed(),
                self.frontier.len(),
                entry.priority
            );
        }

        let graph = self.graph;
        for successor in graph.successors(&entry.state) {
            let successor = successor?;
            let candidate = entry.cost + successor.cost;
            let improves = self
                .cost_to_reach
                .get(&successor.state)
                .map_or(true, |&known| candidate < known);
            if !improves {
                continue;
            }

            let estimate = self.heuristic.estimate(&successor.state, successor.action);
            if estimate == f64::INFINITY {
                log::trace!("pruned '{}' -> {}", successor.action, successor.state);
                continue;
            }

            log::trace!(
                "'{}' -> {} at cost {}",
                successor.action,
                successor.state,
                candidate
            );
            self.cost_to_reach.insert(successor.state.clone(), candidate);
            self.predecessor.insert(
                successor.state.clone(),
                (entry.state.clone(), successor.recipe),
            );
            self.frontier.push(FrontierEntry {
                priority: candidate + estimate,
                cost: candidate,
                state: successor.state,
            });
        }
        Ok(())
    }

    /// Steps until the search reaches a terminal status.
    ///
    /// # Errors
    ///
    /// * [`PlanError::TimeBudgetExceeded`] - the time budget ran out
    /// * [`PlanError::FrontierExhausted`] - no reachable state satisfies the goal
    /// * [`PlanError::NegativeQuantity`] - see [`step`](Self::step)
    pub fn run(mut self) -> Result<Plan> {
        while !self.step()?.is_terminal() {}

        if let Some(goal_state) = self.found.take() {
            return Ok(self.reconstruct(goal_state));
        }
        match self.status {
            SearchStatus::TimeExceeded => Err(PlanError::TimeBudgetExceeded {
                elapsed: self.started.elapsed(),
                expanded: self.expanded,
            }),
            _ => Err(PlanError::FrontierExhausted {
                expanded: self.expanded,
            }),
        }
    }

    /// Walks the predecessor map back from the goal state.
    fn reconstruct(&self, goal_state: InventoryState) -> Plan {
        let cost = self.cost_to_reach.get(&goal_state).copied().unwrap_or(0.0);
        let recipes = self.graph.recipes();

        let mut steps = Vec::new();
        let mut current = &goal_state;
        while let Some((previous, recipe)) = self.predecessor.get(current) {
            steps.push(PlanStep {
                state: previous.clone(),
                action: recipes[*recipe].name().to_string(),
            });
            current = previous;
        }
        steps.reverse();

        Plan {
            steps,
            final_state: goal_state,
            cost,
        }
    }
}
