//! # Inventory State
//!
//! This module provides [`InventoryState`], the search-graph node of the
//! planner, and [`ItemUniverse`], the fixed set of items every state is
//! defined over.
//!
//! ## What is a state here?
//!
//! A state is a snapshot of how many units of each item the player holds.
//! Every state built for one problem shares the same universe, so two states
//! differ only in their quantities. That makes equality, hashing and ordering
//! plain comparisons of a quantity slice:
//!
//! - **Equality / Hash**: value based, so a state can key the cost table and
//!   the predecessor map
//! - **Ordering**: lexicographic over quantities in universe order, used only
//!   to break priority ties deterministically
//!
//! ## Basic Usage
//!
//! ```
//! use craftplan::{InventoryState, ItemUniverse};
//! use std::sync::Arc;
//!
//! let universe = Arc::new(ItemUniverse::new(["wood", "plank", "stick"]));
//!
//! let mut state = InventoryState::new(universe.clone());
//! state.set("wood", 3).unwrap();
//!
//! assert_eq!(state.get("wood"), 3);
//! assert_eq!(state.get("plank"), 0);
//! // Items outside the universe read as zero
//! assert_eq!(state.get("diamond"), 0);
//!
//! // Copies are independent values
//! let mut next = state.clone();
//! next.set("plank", 4).unwrap();
//! assert_ne!(state, next);
//! assert_eq!(state.to_string(), "{wood: 3}");
//! ```

use crate::{PlanError, Result};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The ordered set of item identifiers a problem is defined over.
///
/// Insertion order is preserved and duplicates are ignored. The universe is
/// fixed once built; states share it through an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUniverse {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ItemUniverse {
    /// Builds a universe from item names, keeping the first occurrence of each.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut universe = Self::default();
        for item in items {
            let item = item.into();
            if !universe.index.contains_key(&item) {
                universe.index.insert(item.clone(), universe.names.len());
                universe.names.push(item);
            }
        }
        universe
    }

    /// Position of `item` in the universe, if it belongs to it.
    pub fn index_of(&self, item: &str) -> Option<usize> {
        self.index.get(item).copied()
    }

    /// Like [`index_of`](Self::index_of) but reports the missing item as an
    /// [`PlanError::UnknownItem`] attributed to `context`.
    pub(crate) fn require(&self, item: &str, context: impl FnOnce() -> String) -> Result<usize> {
        self.index_of(item)
            .ok_or_else(|| PlanError::unknown_item(context(), item))
    }

    /// Fails with [`PlanError::UniverseMismatch`] unless `names` lists exactly
    /// this universe's items in the same order.
    pub(crate) fn ensure_same(&self, names: &[String], context: &str) -> Result<()> {
        if names == self.names.as_slice() {
            Ok(())
        } else {
            Err(PlanError::UniverseMismatch {
                context: context.to_string(),
            })
        }
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.index.contains_key(item)
    }
}

/// A snapshot of item quantities, used as a node of the search graph.
///
/// States are treated as immutable values once handed to the planner: every
/// transition produces a new state. `set` exists for building initial
/// inventories and for tests.
///
/// # Examples
///
/// ```
/// use craftplan::{InventoryState, ItemUniverse};
/// use std::collections::BTreeMap;
/// use std::sync::Arc;
///
/// let universe = Arc::new(ItemUniverse::new(["wood", "plank"]));
/// let initial = BTreeMap::from([("wood".to_string(), 5u64)]);
///
/// let state = InventoryState::with_quantities(universe.clone(), &initial).unwrap();
/// assert_eq!(state.get("wood"), 5);
///
/// // Unknown items in an initial inventory are rejected
/// let bad = BTreeMap::from([("stone".to_string(), 1u64)]);
/// assert!(InventoryState::with_quantities(universe, &bad).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct InventoryState {
    universe: Arc<ItemUniverse>,
    quantities: Box<[u64]>,
}

impl InventoryState {
    /// Creates a state holding zero of every item in the universe.
    pub fn new(universe: Arc<ItemUniverse>) -> Self {
        let quantities = vec![0; universe.len()].into_boxed_slice();
        Self {
            universe,
            quantities,
        }
    }

    /// Creates a zeroed state and overrides it with explicit quantities.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::UnknownItem`] if `initial` names an item outside
    /// the universe.
    pub fn with_quantities<'a, I>(universe: Arc<ItemUniverse>, initial: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a u64)>,
    {
        let mut state = Self::new(universe);
        for (item, &quantity) in initial {
            let index = state
                .universe
                .require(item, || "initial inventory".to_string())?;
            state.quantities[index] = quantity;
        }
        Ok(state)
    }

    /// Quantity held of `item`; zero for items outside the universe.
    pub fn get(&self, item: &str) -> u64 {
        self.universe
            .index_of(item)
            .map_or(0, |index| self.quantities[index])
    }

    /// Sets the quantity of `item`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::UnknownItem`] if `item` is outside the universe.
    pub fn set(&mut self, item: &str, quantity: u64) -> Result<()> {
        let index = self.universe.require(item, || "state update".to_string())?;
        self.quantities[index] = quantity;
        Ok(())
    }

    pub fn universe(&self) -> &Arc<ItemUniverse> {
        &self.universe
    }

    /// `(item, quantity)` pairs in universe order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.universe
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.quantities.iter().copied())
    }

    pub(crate) fn quantity_at(&self, index: usize) -> u64 {
        self.quantities[index]
    }

    pub(crate) fn quantities_mut(&mut self) -> &mut [u64] {
        &mut self.quantities
    }

    fn same_universe(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.universe, &other.universe) || self.universe == other.universe
    }
}

impl PartialEq for InventoryState {
    fn eq(&self, other: &Self) -> bool {
        self.quantities == other.quantities && self.same_universe(other)
    }
}

impl Eq for InventoryState {}

impl Hash for InventoryState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.quantities.hash(state);
    }
}

impl Ord for InventoryState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.quantities.cmp(&other.quantities).then_with(|| {
            if self.same_universe(other) {
                Ordering::Equal
            } else {
                self.universe.names().cmp(other.universe.names())
            }
        })
    }
}

impl PartialOrd for InventoryState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Renders only the items actually held, e.g. `{wood: 2, plank: 4}`.
impl fmt::Display for InventoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (item, quantity) in self.iter().filter(|(_, quantity)| *quantity > 0) {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", item, quantity)?;
            first = false;
        }
        write!(f, "}}")
    }
}
