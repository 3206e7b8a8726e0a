//! # Heuristics
//!
//! A heuristic scores a freshly generated state together with the action that
//! produced it. The planner adds the score to the path cost to order its
//! frontier, and drops successors scored `f64::INFINITY` altogether.
//!
//! Heuristics here are search-control signals, not distance bounds: a
//! heuristic that overestimates trades optimality (or even completeness) for
//! a smaller search.
//!
//! Any `Fn(&InventoryState, &str) -> f64` is a heuristic:
//!
//! ```
//! use craftplan::{Heuristic, InventoryState, ItemUniverse};
//! use std::sync::Arc;
//!
//! let cap_planks = |state: &InventoryState, _action: &str| {
//!     if state.get("plank") > 8 { f64::INFINITY } else { 0.0 }
//! };
//!
//! let mut state = InventoryState::new(Arc::new(ItemUniverse::new(["plank"])));
//! state.set("plank", 12).unwrap();
//! assert_eq!(cap_planks.estimate(&state, "craft plank"), f64::INFINITY);
//! ```

use crate::InventoryState;

/// Trait for estimating the remaining cost from a state.
pub trait Heuristic {
    /// Returns a non-negative estimate, or `f64::INFINITY` to prune `state`.
    fn estimate(&self, state: &InventoryState, action: &str) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(&InventoryState, &str) -> f64,
{
    fn estimate(&self, state: &InventoryState, action: &str) -> f64 {
        self(state, action)
    }
}

/// Always zero, turning best-first search into uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _state: &InventoryState, _action: &str) -> f64 {
        0.0
    }
}

/// A family of interchangeable tools ordered from lowest to highest tier.
///
/// A tier name is matched against action names by substring, so it catches
/// both crafting a tool (`craft stone_axe at bench`) and using it
/// (`stone_axe for wood`). Tiers that are actions rather than items, like
/// `punch`, simply never count as held.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolFamily {
    pub tiers: Vec<String>,
}

impl ToolFamily {
    pub fn new<I, S>(tiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tiers: tiers.into_iter().map(Into::into).collect(),
        }
    }

    /// True if `action` names a tier while a higher tier is already held.
    fn is_downgrade(&self, state: &InventoryState, action: &str) -> bool {
        // Highest tier first, so "iron_pickaxe for ore" never matches a lower one
        let Some(tier) = self.tiers.iter().rposition(|tier| action.contains(tier.as_str())) else {
            return false;
        };
        self.tiers[tier + 1..]
            .iter()
            .any(|higher| state.get(higher) >= 1)
    }
}

/// Two gathered resources that should be kept within `max_gap` of each other.
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedPair {
    pub first: String,
    pub second: String,
    pub max_gap: u64,
}

/// A soft penalty for gathering `item` while some is already held.
#[derive(Debug, Clone, PartialEq)]
pub struct GatherPenalty {
    pub item: String,
    pub penalty: f64,
}

/// The reference crafting policy: prunes wasteful crafting and stockpiling.
///
/// It is data driven; [`Default`] carries the values tuned for the standard
/// Minecraft-style crafting problem. Clauses are evaluated in this order and
/// evaluation stops at the first infinite contribution:
///
/// 1. more than one of any `redundant` item
/// 2. a `tool_families` downgrade
/// 3. a `balanced_pairs` gather (`for <item>`) that leaves the pair unbalanced
/// 4. `gather_penalties` for `for <item>` actions while the item is held
/// 5. any `caps` exceeded
///
/// ```
/// use craftplan::{CraftingHeuristic, Heuristic, InventoryState, ItemUniverse};
/// use std::sync::Arc;
///
/// let universe = Arc::new(ItemUniverse::new(["wood", "bench"]));
/// let heuristic = CraftingHeuristic::default();
///
/// let mut state = InventoryState::new(universe);
/// state.set("wood", 1).unwrap();
/// assert_eq!(heuristic.estimate(&state, "punch for wood"), 300.0);
///
/// state.set("bench", 2).unwrap();
/// assert_eq!(heuristic.estimate(&state, "craft bench"), f64::INFINITY);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CraftingHeuristic {
    pub redundant: Vec<String>,
    pub tool_families: Vec<ToolFamily>,
    pub balanced_pairs: Vec<BalancedPair>,
    pub gather_penalties: Vec<GatherPenalty>,
    pub caps: Vec<(String, u64)>,
}

impl CraftingHeuristic {
    /// A policy with no clauses; always estimates zero until configured.
    pub fn empty() -> Self {
        Self {
            redundant: Vec::new(),
            tool_families: Vec::new(),
            balanced_pairs: Vec::new(),
            gather_penalties: Vec::new(),
            caps: Vec::new(),
        }
    }

    pub fn with_cap(mut self, item: impl Into<String>, cap: u64) -> Self {
        self.caps.push((item.into(), cap));
        self
    }

    pub fn with_redundant(mut self, item: impl Into<String>) -> Self {
        self.redundant.push(item.into());
        self
    }
}

impl Default for CraftingHeuristic {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            redundant: strings(&[
                "bench",
                "cart",
                "furnace",
                "iron_axe",
                "iron_pickaxe",
                "stone_axe",
                "stone_pickaxe",
                "wooden_axe",
                "wooden_pickaxe",
            ]),
            tool_families: vec![
                ToolFamily::new(["wooden_pickaxe", "stone_pickaxe", "iron_pickaxe"]),
                ToolFamily::new(["punch", "wooden_axe", "stone_axe", "iron_axe"]),
            ],
            balanced_pairs: vec![BalancedPair {
                first: "ore".to_string(),
                second: "coal".to_string(),
                max_gap: 1,
            }],
            gather_penalties: vec![GatherPenalty {
                item: "wood".to_string(),
                penalty: 300.0,
            }],
            caps: [
                ("cobble", 8),
                ("ingot", 6),
                ("plank", 13),
                ("stick", 5),
                ("wood", 1),
                ("ore", 6),
                ("coal", 6),
            ]
            .into_iter()
            .map(|(item, cap)| (item.to_string(), cap))
            .collect(),
        }
    }
}

fn gathers(action: &str, item: &str) -> bool {
    action
        .find(" for ")
        .is_some_and(|at| action[at + " for ".len()..].starts_with(item))
}

impl Heuristic for CraftingHeuristic {
    fn estimate(&self, state: &InventoryState, action: &str) -> f64 {
        if self.redundant.iter().any(|item| state.get(item) > 1) {
            return f64::INFINITY;
        }

        if self
            .tool_families
            .iter()
            .any(|family| family.is_downgrade(state, action))
        {
            return f64::INFINITY;
        }

        let unbalanced = self.balanced_pairs.iter().any(|pair| {
            (gathers(action, &pair.first) || gathers(action, &pair.second))
                && state.get(&pair.first).abs_diff(state.get(&pair.second)) > pair.max_gap
        });
        if unbalanced {
            return f64::INFINITY;
        }

        let mut total = 0.0;
        for penalty in &self.gather_penalties {
            if gathers(action, &penalty.item) && state.get(&penalty.item) > 0 {
                total += penalty.penalty;
            }
        }

        if self.caps.iter().any(|(item, cap)| state.get(item) > *cap) {
            return f64::INFINITY;
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemUniverse;
    use std::sync::Arc;

    fn state(items: &[(&str, u64)]) -> InventoryState {
        let universe = Arc::new(ItemUniverse::new([
            "bench",
            "coal",
            "cobble",
            "ingot",
            "iron_axe",
            "iron_pickaxe",
            "ore",
            "plank",
            "stick",
            "stone_axe",
            "stone_pickaxe",
            "wood",
            "wooden_axe",
            "wooden_pickaxe",
        ]));
        let mut state = InventoryState::new(universe);
        for &(item, quantity) in items {
            state.set(item, quantity).unwrap();
        }
        state
    }

    #[test]
    fn test_zero_heuristic() {
        assert_eq!(ZeroHeuristic.estimate(&state(&[("wood", 9)]), "anything"), 0.0);
    }

    #[test]
    fn test_closure_heuristic() {
        let h = |s: &InventoryState, action: &str| s.get("plank") as f64 + action.len() as f64;
        assert_eq!(h.estimate(&state(&[("plank", 2)]), "abc"), 5.0);
    }

    #[test]
    fn test_redundant_item_twice_is_pruned() {
        let h = CraftingHeuristic::default();
        assert_eq!(h.estimate(&state(&[("bench", 1)]), "craft bench"), 0.0);
        assert_eq!(h.estimate(&state(&[("bench", 2)]), "craft bench"), f64::INFINITY);
    }

    #[test]
    fn test_lower_tier_pickaxe_is_pruned() {
        let h = CraftingHeuristic::default();
        let held = state(&[("iron_pickaxe", 1), ("stone_pickaxe", 1)]);
        assert_eq!(h.estimate(&held, "craft stone_pickaxe at bench"), f64::INFINITY);
        assert_eq!(h.estimate(&held, "wooden_pickaxe for cobble"), f64::INFINITY);
        assert_eq!(h.estimate(&held, "iron_pickaxe for ore"), 0.0);
    }

    #[test]
    fn test_punch_after_axe_is_pruned() {
        let h = CraftingHeuristic::default();
        let held = state(&[("wooden_axe", 1)]);
        assert_eq!(h.estimate(&held, "punch for wood"), f64::INFINITY);
        assert_eq!(h.estimate(&held, "wooden_axe for wood"), 0.0);
        assert_eq!(h.estimate(&state(&[]), "punch for wood"), 0.0);
    }

    #[test]
    fn test_ore_and_coal_stay_balanced() {
        let h = CraftingHeuristic::default();
        assert_eq!(h.estimate(&state(&[("ore", 2), ("coal", 1)]), "stone_pickaxe for ore"), 0.0);
        assert_eq!(
            h.estimate(&state(&[("ore", 3), ("coal", 1)]), "stone_pickaxe for ore"),
            f64::INFINITY
        );
        // Only gathering actions are checked
        assert_eq!(h.estimate(&state(&[("ore", 3), ("coal", 1)]), "smelt ore in furnace"), 0.0);
    }

    #[test]
    fn test_wood_gathering_penalty() {
        let h = CraftingHeuristic::default();
        assert_eq!(h.estimate(&state(&[("wood", 1)]), "wooden_axe for wood"), 300.0);
        assert_eq!(h.estimate(&state(&[("plank", 4)]), "craft plank"), 0.0);
    }

    #[test]
    fn test_caps() {
        let h = CraftingHeuristic::default();
        assert_eq!(h.estimate(&state(&[("plank", 13)]), "craft plank"), 0.0);
        assert_eq!(h.estimate(&state(&[("plank", 14)]), "craft plank"), f64::INFINITY);
        assert_eq!(h.estimate(&state(&[("wood", 2)]), "punch for wood"), f64::INFINITY);
    }

    #[test]
    fn test_empty_policy_with_cap() {
        let h = CraftingHeuristic::empty().with_cap("plank", 8);
        assert_eq!(h.estimate(&state(&[("bench", 3), ("plank", 8)]), "x"), 0.0);
        assert_eq!(h.estimate(&state(&[("plank", 9)]), "x"), f64::INFINITY);
    }

    #[test]
    fn test_empty_policy_with_redundant() {
        let h = CraftingHeuristic::empty().with_redundant("stick");
        assert_eq!(h.estimate(&state(&[("stick", 1), ("bench", 2)]), "x"), 0.0);
        assert_eq!(h.estimate(&state(&[("stick", 2)]), "x"), f64::INFINITY);
    }

    #[test]
    fn test_gathers_matches_target_only() {
        assert!(gathers("punch for wood", "wood"));
        assert!(gathers("stone_pickaxe for coal", "coal"));
        assert!(!gathers("craft wooden_axe at bench", "wood"));
        assert!(!gathers("stone_pickaxe for ore", "coal"));
    }
}
