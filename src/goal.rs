use crate::{InventoryState, ItemUniverse, Result};
use std::fmt;

/// A compiled goal: minimum quantities for some items of the universe.
///
/// Items the goal does not mention are unconstrained.
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    universe_names: Vec<String>,
    minimums: Vec<(usize, u64)>,
}

impl Goal {
    /// Compiles a goal inventory against `universe`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::UnknownItem`](crate::PlanError::UnknownItem) if the
    /// goal names an item outside the universe.
    pub fn compile<'a, I>(goal: I, universe: &ItemUniverse) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a u64)>,
    {
        let minimums = goal
            .into_iter()
            .map(|(item, &minimum)| Ok((universe.require(item, || "goal".to_string())?, minimum)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            universe_names: universe.names().to_vec(),
            minimums,
        })
    }

    /// Returns `true` if `state` holds at least the minimum of every goal item.
    pub fn is_satisfied(&self, state: &InventoryState) -> bool {
        self.minimums
            .iter()
            .all(|&(index, minimum)| state.quantity_at(index) >= minimum)
    }

    pub(crate) fn universe_names(&self) -> &[String] {
        &self.universe_names
    }

    /// `(item, minimum)` pairs in the order they were compiled.
    pub fn requirements(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.minimums
            .iter()
            .map(|&(index, minimum)| (self.universe_names[index].as_str(), minimum))
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<_> = self
            .requirements()
            .map(|(item, minimum)| format!("{} >= {}", item, minimum))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
