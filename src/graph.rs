use crate::{InventoryState, Recipe, Result};

/// One outgoing edge of the crafting graph.
#[derive(Debug, Clone)]
pub struct Successor<'a> {
    /// Index of the recipe in the graph's recipe slice
    pub recipe: usize,
    pub action: &'a str,
    pub state: InventoryState,
    pub cost: f64,
}

/// The implicit state graph induced by a set of compiled recipes.
///
/// The graph holds no cursor: [`successors`](Self::successors) is a pure
/// function of the state it is given and may be called any number of times.
#[derive(Debug, Clone, Copy)]
pub struct ActionGraph<'a> {
    recipes: &'a [Recipe],
}

impl<'a> ActionGraph<'a> {
    pub fn new(recipes: &'a [Recipe]) -> Self {
        Self { recipes }
    }

    pub fn recipes(&self) -> &'a [Recipe] {
        self.recipes
    }

    /// Lazily yields a successor for every recipe applicable to `state`, in
    /// recipe order.
    pub fn successors<'s>(
        &self,
        state: &'s InventoryState,
    ) -> impl Iterator<Item = Result<Successor<'a>>> + 's
    where
        'a: 's,
    {
        self.recipes
            .iter()
            .enumerate()
            .filter(move |(_, recipe)| recipe.is_applicable(state))
            .map(move |(index, recipe)| {
                Ok(Successor {
                    recipe: index,
                    action: recipe.name(),
                    state: recipe.apply(state)?,
                    cost: recipe.cost(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemUniverse, Rule, ZeroConsumeGating};
    use std::sync::Arc;

    fn setup() -> (Arc<ItemUniverse>, Vec<Recipe>) {
        let universe = Arc::new(ItemUniverse::new(["wood", "plank", "bench"]));
        let rules = [
            ("punch for wood", Rule::new(4.0).produces("wood", 1)),
            (
                "craft plank",
                Rule::new(1.0).consumes("wood", 1).produces("plank", 4),
            ),
            (
                "craft bench",
                Rule::new(1.0).consumes("plank", 4).produces("bench", 1),
            ),
        ];
        let recipes = rules
            .iter()
            .map(|(name, rule)| {
                Recipe::compile(*name, rule, &universe, ZeroConsumeGating::Ungated).unwrap()
            })
            .collect();
        (universe, recipes)
    }

    #[test]
    fn test_only_applicable_recipes_are_yielded() {
        let (universe, recipes) = setup();
        let graph = ActionGraph::new(&recipes);
        let state = InventoryState::new(universe);

        let actions: Vec<_> = graph
            .successors(&state)
            .map(|s| s.unwrap().action)
            .collect();
        assert_eq!(actions, ["punch for wood"]);
    }

    #[test]
    fn test_successor_carries_state_and_cost() {
        let (universe, recipes) = setup();
        let graph = ActionGraph::new(&recipes);
        let mut state = InventoryState::new(universe);
        state.set("wood", 1).unwrap();

        let successors: Vec<_> = graph.successors(&state).map(|s| s.unwrap()).collect();
        assert_eq!(successors.len(), 2);
        assert_eq!(successors[1].action, "craft plank");
        assert_eq!(successors[1].recipe, 1);
        assert_eq!(successors[1].cost, 1.0);
        assert_eq!(successors[1].state.get("plank"), 4);
        assert_eq!(successors[1].state.get("wood"), 0);
    }

    #[test]
    fn test_successors_are_restartable() {
        let (universe, recipes) = setup();
        let graph = ActionGraph::new(&recipes);
        let mut state = InventoryState::new(universe);
        state.set("plank", 4).unwrap();

        let first: Vec<_> = graph.successors(&state).map(|s| s.unwrap().state).collect();
        let second: Vec<_> = graph.successors(&state).map(|s| s.unwrap().state).collect();
        assert_eq!(first, second);
    }
}
