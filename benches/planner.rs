use craftplan::{CraftingHeuristic, Planner, PlannerConfig, RuleSet, ZeroHeuristic};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::BTreeMap;

fn crafting_problem() -> RuleSet {
    RuleSet::from_json_str(include_str!("../demos/crafting.json")).expect("problem file")
}

fn bench_crafting_planner(c: &mut Criterion) {
    let problem = crafting_problem();
    let planner = Planner::from_rule_set(&problem, PlannerConfig::default()).expect("planner");
    let start = planner.state(&problem.initial).expect("start");
    let goal = planner.goal(&problem.goal).expect("goal");
    let heuristic = CraftingHeuristic::default();

    c.bench_function("craftplan/plan(stone_pickaxe)", |b| {
        b.iter(|| {
            let plan = planner.plan(&start, &goal, &heuristic).expect("plan");
            black_box(plan.len());
        })
    });
}

fn bench_uniform_cost(c: &mut Criterion) {
    let problem = crafting_problem();
    let planner = Planner::from_rule_set(&problem, PlannerConfig::default()).expect("planner");
    let start = planner.state(&problem.initial).expect("start");
    let goal = planner
        .goal(&BTreeMap::from([("stick".to_string(), 4)]))
        .expect("goal");

    c.bench_function("craftplan/plan(stick, zero heuristic)", |b| {
        b.iter(|| {
            let plan = planner.plan(&start, &goal, &ZeroHeuristic).expect("plan");
            black_box(plan.cost);
        })
    });
}

criterion_group!(benches, bench_crafting_planner, bench_uniform_cost);
criterion_main!(benches);
