//! # Recipes
//!
//! A [`Recipe`] is a [`Rule`] compiled against an [`ItemUniverse`]: item names
//! are resolved to universe positions once, so the precondition and the
//! transition run on plain slices during search.
//!
//! ```
//! use craftplan::{InventoryState, ItemUniverse, Recipe, Rule, ZeroConsumeGating};
//! use std::sync::Arc;
//!
//! let universe = Arc::new(ItemUniverse::new(["wood", "plank"]));
//! let rule = Rule::new(1.0).consumes("wood", 1).produces("plank", 4);
//! let recipe = Recipe::compile("craft plank", &rule, &universe, ZeroConsumeGating::Ungated).unwrap();
//!
//! let mut state = InventoryState::new(universe);
//! assert!(!recipe.is_applicable(&state));
//!
//! state.set("wood", 2).unwrap();
//! let next = recipe.apply(&state).unwrap();
//! assert_eq!(next.get("wood"), 1);
//! assert_eq!(next.get("plank"), 4);
//! ```

use crate::{InventoryState, ItemUniverse, PlanError, Result, Rule};

/// How a `Consumes` clause with an amount of zero gates applicability.
///
/// A zero-amount consume never fails the quantity check on its own, so the
/// item may be absent. `RequirePresence` treats such a clause as an implicit
/// `Requires`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroConsumeGating {
    #[default]
    Ungated,
    RequirePresence,
}

/// A compiled production rule.
#[derive(Debug, Clone)]
pub struct Recipe {
    name: String,
    cost: f64,
    requires: Vec<usize>,
    consumes: Vec<(usize, u64)>,
    produces: Vec<(usize, u64)>,
}

impl Recipe {
    /// Compiles `rule` against `universe`.
    ///
    /// # Errors
    ///
    /// * [`PlanError::UnknownItem`] - a clause names an item outside the universe
    /// * [`PlanError::InvalidRecipeCost`] - `Time` is not a positive, finite number
    pub fn compile(
        name: impl Into<String>,
        rule: &Rule,
        universe: &ItemUniverse,
        gating: ZeroConsumeGating,
    ) -> Result<Self> {
        let name = name.into();
        if !(rule.time.is_finite() && rule.time > 0.0) {
            return Err(PlanError::InvalidRecipeCost { recipe: name });
        }

        let context = || format!("recipe '{}'", name);
        let mut requires = rule
            .requires
            .keys()
            .map(|item| universe.require(item, context))
            .collect::<Result<Vec<_>>>()?;
        let consumes = rule
            .consumes
            .iter()
            .map(|(item, &amount)| Ok((universe.require(item, context)?, amount)))
            .collect::<Result<Vec<_>>>()?;
        let produces = rule
            .produces
            .iter()
            .map(|(item, &amount)| Ok((universe.require(item, context)?, amount)))
            .collect::<Result<Vec<_>>>()?;

        if gating == ZeroConsumeGating::RequirePresence {
            requires.extend(
                consumes
                    .iter()
                    .filter(|(_, amount)| *amount == 0)
                    .map(|(index, _)| *index),
            );
            requires.sort_unstable();
            requires.dedup();
        }

        Ok(Self {
            name,
            cost: rule.time,
            requires,
            consumes,
            produces,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Checks the recipe's precondition against `state`.
    ///
    /// Every required item must be held, and every consumed item must be held
    /// in at least the consumed amount. A recipe with neither clause is always
    /// applicable.
    pub fn is_applicable(&self, state: &InventoryState) -> bool {
        self.requires
            .iter()
            .all(|&index| state.quantity_at(index) > 0)
            && self
                .consumes
                .iter()
                .all(|&(index, amount)| state.quantity_at(index) >= amount)
    }

    /// Produces the state reached by applying this recipe to `state`.
    ///
    /// Consumption is applied before production, so a recipe may consume and
    /// produce the same item. Callers check [`is_applicable`](Self::is_applicable)
    /// first.
    ///
    /// # Errors
    ///
    /// * [`PlanError::NegativeQuantity`] - a consumed item is held in
    ///   insufficient quantity
    /// * [`PlanError::QuantityOverflow`] - a produced item would exceed `u64::MAX`
    pub fn apply(&self, state: &InventoryState) -> Result<InventoryState> {
        let item = |index: usize| state.universe().name(index).unwrap_or_default().to_string();
        let mut next = state.clone();
        let quantities = next.quantities_mut();
        for &(index, amount) in &self.consumes {
            quantities[index] = quantities[index].checked_sub(amount).ok_or_else(|| {
                PlanError::NegativeQuantity {
                    recipe: self.name.clone(),
                    item: item(index),
                }
            })?;
        }
        for &(index, amount) in &self.produces {
            quantities[index] = quantities[index].checked_add(amount).ok_or_else(|| {
                PlanError::QuantityOverflow {
                    recipe: self.name.clone(),
                    item: item(index),
                }
            })?;
        }
        Ok(next)
    }

    pub(crate) fn describe(&self, universe: &ItemUniverse) -> String {
        let name_of = |index: usize| universe.name(index).unwrap_or_default();
        let amounts = |entries: &[(usize, u64)]| {
            entries
                .iter()
                .map(|&(index, amount)| format!("{} x{}", name_of(index), amount))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let requires = self
            .requires
            .iter()
            .map(|&index| name_of(index))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "requires [{}] consumes [{}] produces [{}]",
            requires,
            amounts(&self.consumes),
            amounts(&self.produces)
        )
    }
}
