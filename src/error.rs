use std::time::Duration;
use thiserror::Error;

/// Errors produced while compiling a crafting problem or searching for a plan.
///
/// The first three variants are raised before or during compilation and point
/// at malformed input. `TimeBudgetExceeded` and `FrontierExhausted` are the two
/// ordinary ways a search can fail; a caller may retry them with a larger
/// budget or a different heuristic.
#[derive(Error, Debug)]
pub enum PlanError {
    /// An item referenced by a recipe, goal or inventory is not part of the universe
    #[error("Unknown item '{item}' in {context}")]
    UnknownItem { context: String, item: String },

    /// A recipe's time cost is zero, negative or not finite
    #[error("Recipe '{recipe}' must have a positive cost")]
    InvalidRecipeCost { recipe: String },

    /// A transition tried to drive a quantity below zero
    #[error("Recipe '{recipe}' would make '{item}' negative")]
    NegativeQuantity { recipe: String, item: String },

    /// A transition tried to raise a quantity past `u64::MAX`
    #[error("Recipe '{recipe}' would overflow '{item}'")]
    QuantityOverflow { recipe: String, item: String },

    /// A state or goal was built over a different item universe than the
    /// planner or search it was handed to
    #[error("The {context} was built over a different item universe")]
    UniverseMismatch { context: String },

    /// The wall-clock budget ran out before a plan was found
    #[error("No plan found within {elapsed:?} ({expanded} states expanded)")]
    TimeBudgetExceeded { elapsed: Duration, expanded: usize },

    /// Every reachable state was expanded without satisfying the goal
    #[error("Goal unreachable: frontier exhausted after {expanded} states")]
    FrontierExhausted { expanded: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid problem file: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlanError {
    pub(crate) fn unknown_item(context: impl Into<String>, item: impl Into<String>) -> Self {
        Self::UnknownItem {
            context: context.into(),
            item: item.into(),
        }
    }

    /// Returns `true` for the failures a caller can recover from by retrying
    /// with a different budget or heuristic.
    pub fn is_search_failure(&self) -> bool {
        matches!(
            self,
            Self::TimeBudgetExceeded { .. } | Self::FrontierExhausted { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_unknown_item_display() {
        let err = PlanError::unknown_item("recipe 'craft plank'", "plonk");
        assert_eq!(
            format!("{}", err),
            "Unknown item 'plonk' in recipe 'craft plank'"
        );
    }

    #[test]
    fn test_invalid_recipe_cost_display() {
        let err = PlanError::InvalidRecipeCost {
            recipe: "punch for wood".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Recipe 'punch for wood' must have a positive cost"
        );
    }

    #[test]
    fn test_universe_mismatch_display() {
        let err = PlanError::UniverseMismatch {
            context: "goal".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "The goal was built over a different item universe"
        );
    }

    #[test]
    fn test_frontier_exhausted_display() {
        let err = PlanError::FrontierExhausted { expanded: 12 };
        assert_eq!(
            format!("{}", err),
            "Goal unreachable: frontier exhausted after 12 states"
        );
    }

    #[test]
    fn test_search_failures_are_recoverable() {
        assert!(PlanError::FrontierExhausted { expanded: 0 }.is_search_failure());
        assert!(PlanError::TimeBudgetExceeded {
            elapsed: Duration::from_secs(1),
            expanded: 3,
        }
        .is_search_failure());
        assert!(!PlanError::NegativeQuantity {
            recipe: "smelt".to_string(),
            item: "ore".to_string(),
        }
        .is_search_failure());
    }

    #[test]
    fn test_error_trait() {
        let err = PlanError::FrontierExhausted { expanded: 1 };
        assert!(err.source().is_none());
    }
}
