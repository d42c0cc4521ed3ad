use covmine::coverage::{
    percentage, CallGraphCoverage, ClassAggregation, CoverageUniverse, DirectCoverage, Ratio,
};
use covmine::core::{NamingScheme, TestRule, Unit};
use covmine::data::CoverageData;
use covmine::graph::{CallEdge, CallGraph, CallType, DependencyGraph};
use covmine::results::{MetricResult, ResultSet};
use proptest::prelude::*;
use std::collections::BTreeMap;

const PRODUCTION: usize = 8;

fn method(fqn: &str) -> Unit {
    Unit::method(fqn, None, &NamingScheme::jvm())
}

fn test_method(index: usize) -> Unit {
    method(&format!("t.Test{}.m{}", index / 2, index % 2))
}

fn production(index: usize) -> Unit {
    method(&format!("p.C{index}.m"))
}

fn rule() -> TestRule {
    TestRule::from_patterns([r"(^|\.)Test\w*$"]).unwrap()
}

fn build_graph(test_edges: &[(usize, usize)], inner_edges: &[(usize, usize)]) -> CallGraph {
    let mut graph = CallGraph::new();
    (0..PRODUCTION).for_each(|i| graph.add_unit(production(i)));
    for (line, (from, to)) in test_edges.iter().enumerate() {
        graph.add_edge(CallEdge::new(
            CallType::InvokeVirtual,
            line as u32,
            test_method(*from),
            production(*to),
        ));
    }
    for (from, to) in inner_edges {
        graph.add_edge(CallEdge::new(
            CallType::InvokeStatic,
            0,
            production(*from),
            production(*to),
        ));
    }
    graph
}

fn metric_map(results: &[MetricResult], metric: &str) -> BTreeMap<String, String> {
    results
        .iter()
        .map(|r| (r.id().to_string(), r.metric(metric).unwrap_or_default().to_string()))
        .collect()
}

fn result_strategy() -> impl Strategy<Value = MetricResult> {
    (
        0usize..5,
        prop::sample::select(vec!["num_asserts", "call_tcov", "dep_tcov"]),
        0u64..=100,
    )
        .prop_map(|(id, metric, value)| {
            MetricResult::with_metric(format!("unit{id}"), None, metric, value.to_string())
        })
}

#[test]
fn test_end_to_end_worked_example() {
    let t1 = method("org.foo.TestA.t1");
    let t2 = method("org.foo.TestA.t2");
    let c1m1 = method("org.foo.C1.m1");
    let c2m1 = method("org.foo.C2.m1");
    let c3m1 = method("org.foo.C3.m1");

    let mut graph = CallGraph::new();
    graph.add_unit(c3m1);
    graph.add_edge(CallEdge::new(CallType::InvokeVirtual, 1, t1.clone(), c1m1.clone()));
    graph.add_edge(CallEdge::new(CallType::InvokeVirtual, 2, t1, c2m1));
    graph.add_edge(CallEdge::new(CallType::InvokeVirtual, 3, t2, c1m1));
    let rule = rule();

    let coverage = CallGraphCoverage::new(&graph, &rule, "call");
    let methods = metric_map(&coverage.method_level(), "call_tcov_met");
    assert_eq!(methods["org.foo.TestA.t1"], "66");
    assert_eq!(methods["org.foo.TestA.t2"], "33");

    let classes = metric_map(&coverage.class_level(), "call_tcov");
    assert_eq!(classes["org.foo.TestA"], "66");
}

#[test]
fn test_self_loop_with_forward_edge_reaches_one_unit() {
    let mut graph = DependencyGraph::new();
    let test = Unit::class("a.TestLoop", None);
    graph.put_edge(test.clone(), test.clone());
    graph.put_edge(test.clone(), Unit::class("a.Leaf", None));

    let reached = graph.reachable_from(&test);
    assert_eq!(reached.len(), 1);
    assert!(reached.contains(&Unit::class("a.Leaf", None)));
}

proptest! {
    #[test]
    fn prop_percentage_is_truncated_ratio(covered in 0u64..1000, extra in 0u64..1000) {
        let total = covered + extra;
        let value = percentage(covered, total);
        if total == 0 {
            prop_assert_eq!(value, 0);
        } else {
            prop_assert!(value <= 100);
            prop_assert!(value * total <= covered * 100);
            prop_assert!((value + 1) * total > covered * 100);
        }
    }

    #[test]
    fn prop_add_results_is_idempotent(results in prop::collection::vec(result_strategy(), 0..20)) {
        let mut once = ResultSet::new();
        once.add_results(results.clone());
        let mut twice = once.clone();
        twice.add_results(results);
        prop_assert_eq!(once.results(), twice.results());
    }

    #[test]
    fn prop_merge_keeps_union_and_latest_value(
        first in prop::collection::vec(result_strategy(), 0..20),
        second in prop::collection::vec(result_strategy(), 0..20),
    ) {
        let mut set = ResultSet::new();
        set.add_results(first.clone());
        set.add_results(second.clone());

        let mut expected: BTreeMap<(String, String), String> = BTreeMap::new();
        for result in first.iter().chain(second.iter()) {
            for (name, value) in result.metrics() {
                expected.insert((result.id().to_string(), name.clone()), value.clone());
            }
        }

        let actual: BTreeMap<(String, String), String> = set
            .results()
            .iter()
            .flat_map(|r| {
                r.metrics()
                    .iter()
                    .map(move |(name, value)| ((r.id().to_string(), name.clone()), value.clone()))
            })
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_summed_class_ratio_adds_method_ratios(
        test_edges in prop::collection::vec((0usize..6, 0..PRODUCTION), 1..25),
        inner_edges in prop::collection::vec((0..PRODUCTION, 0..PRODUCTION), 0..15),
    ) {
        let graph = build_graph(&test_edges, &inner_edges);
        let rule = rule();
        let coverage = CallGraphCoverage::new(&graph, &rule, "call")
            .with_aggregation(ClassAggregation::Summed);

        let mut expected: BTreeMap<Unit, Ratio> = BTreeMap::new();
        for (test, ratio) in coverage.method_ratios() {
            let entry = expected.entry(test.enclosing_unit()).or_default();
            *entry = *entry + ratio;
        }
        prop_assert_eq!(coverage.class_ratios(), expected);
    }

    #[test]
    fn prop_call_graph_and_direct_coverage_agree(
        test_edges in prop::collection::vec((0usize..6, 0..PRODUCTION), 1..25),
        inner_edges in prop::collection::vec((0..PRODUCTION, 0..PRODUCTION), 0..15),
    ) {
        let graph = build_graph(&test_edges, &inner_edges);
        let rule = rule();
        let universe = CoverageUniverse::new((0..PRODUCTION).map(production));

        let mut data = CoverageData::new();
        for test in graph.test_nodes(&rule) {
            let covered = graph
                .reachable_from(&test)
                .into_iter()
                .filter(|unit| universe.contains(unit));
            data.add(test, covered);
        }

        let call = CallGraphCoverage::new(&graph, &rule, "x");
        let direct = DirectCoverage::new(&data, "x");

        prop_assert_eq!(
            metric_map(&call.method_level(), "x_tcov_met"),
            metric_map(&direct.method_level(&universe).unwrap(), "x_tcov_met")
        );
        prop_assert_eq!(
            metric_map(&call.class_level(), "x_tcov"),
            metric_map(&direct.class_level(&universe).unwrap(), "x_tcov")
        );
    }
}
