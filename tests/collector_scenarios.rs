use covmine::config::{Language, MetricsConfig};
use covmine::coverage::{CallGraphCoverage, CoverageUniverse, DependencyCoverage, DirectCoverage};
use covmine::core::{TestRule, Unit, UnitFactory};
use covmine::data::CoverageData;
use covmine::graph::{CallEdge, CallGraph, CallType, DependencyGraph};
use covmine::results::{MetricResult, ResultSet};
use pretty_assertions::assert_eq;
use std::path::Path;

const TEST1_JAVA: &str = "src/main/java/org/foo/t1/Test1.java";
const TEST2_JAVA: &str = "src/main/java/org/foo/t2/Test2.java";

/// `(id, path, metric value)` rows for one metric, sorted by id.
fn rows(results: Vec<MetricResult>, metric: &str) -> Vec<(String, Option<String>, String)> {
    let set: ResultSet = results.into_iter().collect();
    set.results()
        .into_iter()
        .map(|r| {
            (
                r.id().to_string(),
                r.path().map(|p| p.display().to_string()),
                r.metric(metric).unwrap_or_default().to_string(),
            )
        })
        .collect()
}

fn row(id: &str, path: Option<&str>, value: &str) -> (String, Option<String>, String) {
    (id.to_string(), path.map(str::to_string), value.to_string())
}

struct JavaFixture {
    factory: UnitFactory,
    rule: TestRule,
}

impl JavaFixture {
    fn new() -> Self {
        let config = MetricsConfig::for_language(Language::Jvm);
        Self {
            factory: config.unit_factory(),
            rule: config.test_rule().unwrap(),
        }
    }

    fn method(&self, fqn: &str, path: &str) -> Unit {
        self.factory.method(fqn, Some(path))
    }

    fn t1_test1(&self) -> Unit {
        self.method("org.foo.t1.Test1.test1", TEST1_JAVA)
    }

    fn t2_test1(&self) -> Unit {
        self.method("org.foo.t2.Test2.test1", TEST2_JAVA)
    }

    fn t2_test2(&self) -> Unit {
        self.method("org.foo.t2.Test2.test2", TEST2_JAVA)
    }

    fn call_graph(&self) -> CallGraph {
        let c1m1 = self.method("org.foo.p1.C1.m1", "src/main/java/org/foo/p1/C1.java");
        let c2m1 = self.method("org.foo.p1.C2.m1", "src/main/java/org/foo/p1/C2.java");
        let c3m1 = self.method("org.foo.C3.m1", "src/main/java/org/foo/C3.java");

        let mut graph = CallGraph::new();
        for (line, caller, callee) in [
            (0, self.t1_test1(), c1m1.clone()),
            (0, c1m1.clone(), c2m1),
            (0, self.t2_test1(), c1m1),
            (1, self.t2_test1(), c3m1.clone()),
            (0, self.t2_test2(), c3m1),
        ] {
            graph.add_edge(CallEdge::new(CallType::InvokeSpecial, line, caller, callee));
        }
        graph
    }

    fn coverage(&self) -> (CoverageData, CoverageUniverse) {
        let p1c1m1 = self.method("org.foo.p1.C1.m1", "src/main/java/org/foo/p1/C1.java");
        let p1c2m1 = self.method("org.foo.p1.C2.m1", "src/main/java/org/foo/p1/C2.java");
        let p2c1m1 = self.method("org.foo.p2.C1.m1", "src/main/java/org/foo/p2/C1.java");

        let mut data = CoverageData::new();
        data.add(self.t1_test1(), [p1c1m1.clone(), p1c2m1.clone()]);
        data.add(self.t2_test1(), [p1c1m1.clone()]);
        data.add(self.t2_test2(), [p2c1m1.clone()]);
        (data, CoverageUniverse::new([p1c1m1, p1c2m1, p2c1m1]))
    }
}

struct PythonFixture {
    factory: UnitFactory,
    rule: TestRule,
}

impl PythonFixture {
    fn new() -> Self {
        let config = MetricsConfig::for_language(Language::Python);
        Self {
            factory: config.unit_factory(),
            rule: config.test_rule().unwrap(),
        }
    }

    fn coverage(&self) -> (CoverageData, CoverageUniverse) {
        let init = |module: &str| {
            let fqn = format!("{module}:{}.__init__", module.replace('m', "M"));
            self.factory.method(fqn, Some(Path::new(module).with_extension("py")))
        };
        let (module1, module2, module3) = (init("module1"), init("module2"), init("module3"));
        let test = |fqn: &str, path: &str| self.factory.method(fqn, Some(path));

        let mut data = CoverageData::new();
        data.add(
            test("tests.test_module1:Module1Test.test", "tests/test_module1.py"),
            [module1.clone(), module2.clone()],
        );
        data.add(
            test("tests.test_module2:Module2Test.test", "tests/test_module2.py"),
            [module1.clone()],
        );
        data.add(
            test("tests.test_module2:Module2Test.test2", "tests/test_module2.py"),
            [module3.clone()],
        );
        (data, CoverageUniverse::new([module1, module2, module3]))
    }
}

#[test]
fn test_call_graph_coverage_java_method_level() {
    let fixture = JavaFixture::new();
    let graph = fixture.call_graph();

    let results = CallGraphCoverage::new(&graph, &fixture.rule, "call").method_level();
    assert_eq!(
        rows(results, "call_tcov_met"),
        vec![
            row("org.foo.t1.Test1.test1", Some(TEST1_JAVA), "66"),
            row("org.foo.t2.Test2.test1", Some(TEST2_JAVA), "100"),
            row("org.foo.t2.Test2.test2", Some(TEST2_JAVA), "33"),
        ]
    );
}

#[test]
fn test_call_graph_coverage_java_class_level() {
    let fixture = JavaFixture::new();
    let graph = fixture.call_graph();

    let results = CallGraphCoverage::new(&graph, &fixture.rule, "call").class_level();
    assert_eq!(
        rows(results, "call_tcov"),
        vec![
            row("org.foo.t1.Test1", Some(TEST1_JAVA), "66"),
            row("org.foo.t2.Test2", Some(TEST2_JAVA), "100"),
        ]
    );
}

#[test]
fn test_direct_coverage_java_method_level() {
    let fixture = JavaFixture::new();
    let (data, universe) = fixture.coverage();

    let results = DirectCoverage::new(&data, "cov").method_level(&universe).unwrap();
    assert_eq!(
        rows(results, "cov_tcov_met"),
        vec![
            row("org.foo.t1.Test1.test1", Some(TEST1_JAVA), "66"),
            row("org.foo.t2.Test2.test1", Some(TEST2_JAVA), "33"),
            row("org.foo.t2.Test2.test2", Some(TEST2_JAVA), "33"),
        ]
    );
}

#[test]
fn test_direct_coverage_java_class_level() {
    let fixture = JavaFixture::new();
    let (data, universe) = fixture.coverage();

    let results = DirectCoverage::new(&data, "cov").class_level(&universe).unwrap();
    assert_eq!(
        rows(results, "cov_tcov"),
        vec![
            row("org.foo.t1.Test1", Some(TEST1_JAVA), "66"),
            row("org.foo.t2.Test2", Some(TEST2_JAVA), "66"),
        ]
    );
}

#[test]
fn test_direct_coverage_python_method_level() {
    let fixture = PythonFixture::new();
    let (data, universe) = fixture.coverage();

    let results = DirectCoverage::new(&data, "cov").method_level(&universe).unwrap();
    assert_eq!(
        rows(results, "cov_tcov_met"),
        vec![
            row("tests.test_module1:Module1Test.test", Some("tests/test_module1.py"), "66"),
            row("tests.test_module2:Module2Test.test", Some("tests/test_module2.py"), "33"),
            row("tests.test_module2:Module2Test.test2", Some("tests/test_module2.py"), "33"),
        ]
    );
}

#[test]
fn test_direct_coverage_python_module_level() {
    let fixture = PythonFixture::new();
    let (data, universe) = fixture.coverage();

    let results = DirectCoverage::new(&data, "cov").class_level(&universe).unwrap();
    assert_eq!(
        rows(results, "cov_tcov"),
        vec![
            row("tests.test_module1", Some("tests/test_module1.py"), "66"),
            row("tests.test_module2", Some("tests/test_module2.py"), "66"),
        ]
    );
}

#[test]
fn test_python_tests_are_recognized_by_rule() {
    let fixture = PythonFixture::new();
    let (data, _) = fixture.coverage();

    assert!(data.method_level().keys().all(|test| fixture.rule.is_test(test)));
    assert!(data
        .method_level()
        .values()
        .flatten()
        .all(|covered| fixture.rule.is_production(covered)));
}

#[test]
fn test_dependency_coverage_java() {
    let rule = JavaFixture::new().rule;
    let class = |fqn: &str| Unit::class(fqn, None);

    let mut graph = DependencyGraph::new();
    graph.put_edge(class("org.foo.Test1"), class("org.foo.C1"));
    graph.put_edge(class("org.foo.C1"), class("org.foo.C2"));
    graph.put_edge(class("org.foo.Test2"), class("org.foo.C1"));
    graph.put_edge(class("org.foo.Test2"), class("org.foo.C3"));

    let results = DependencyCoverage::new(&graph, &rule).results();
    assert_eq!(
        rows(results, "dep_tcov"),
        vec![
            row("org.foo.Test1", None, "66"),
            row("org.foo.Test2", None, "100"),
        ]
    );
}

#[test]
fn test_dependency_coverage_python() {
    let fixture = PythonFixture::new();
    let module = |name: &str| {
        fixture
            .factory
            .class(name, Some(format!("{}.py", name.replace('.', "/"))))
    };

    let mut graph = DependencyGraph::new();
    graph.put_edge(module("tests.test1"), module("module1"));
    graph.put_edge(module("module1"), module("module2"));
    graph.put_edge(module("tests.test2"), module("module1"));
    graph.put_edge(module("tests.test2"), module("module3"));

    let results = DependencyCoverage::new(&graph, &fixture.rule).results();
    assert_eq!(
        rows(results, "dep_tcov"),
        vec![
            row("tests.test1", Some("tests/test1.py"), "66"),
            row("tests.test2", Some("tests/test2.py"), "100"),
        ]
    );
}
