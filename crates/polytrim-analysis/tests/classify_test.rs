//! End-to-end classification over tree-sitter parsed sources.

use std::path::Path;

use polytrim_analysis::syntax::normalize;
use polytrim_analysis::{classify, Classifier, FeatureId, JavaScriptParser, Language, SyntaxTree};

fn tree_for(source: &str, language: Language) -> SyntaxTree {
    let mut parser = JavaScriptParser::new(language).unwrap();
    let parsed = parser.parse(source, Path::new("input")).unwrap();
    normalize(parsed.tree.root_node(), source)
}

fn js(source: &str) -> SyntaxTree {
    tree_for(source, Language::JavaScript)
}

fn fixture(rel: &str) -> (SyntaxTree, String) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures")
        .join(rel);
    let source = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    let language = Language::from_path(&path).unwrap();
    (tree_for(&source, language), source)
}

fn sorted(mut ids: Vec<FeatureId>) -> Vec<String> {
    ids.sort();
    ids.into_iter().map(|id| id.as_str().to_string()).collect()
}

// ---- Reference scenarios ----

#[test]
fn symbol_constructor_and_static_for_are_detected() {
    let tree = js("const fx = Symbol('fx'); const dx = Symbol.for('foo')");
    let out = classify(["es.symbol.constructor", "es.symbol.for"], &tree);
    assert_eq!(sorted(out), vec!["es.symbol.constructor", "es.symbol.for"]);
}

#[test]
fn unrelated_global_detects_nothing() {
    let tree = js("const fx = String('fx')");
    let out = classify(["es.symbol.constructor", "es.symbol.for"], &tree);
    assert!(out.is_empty(), "got {out:?}");
}

#[test]
fn math_static_matches_only_its_member() {
    let out = classify(["es.math.cosh"], &js("Math.cosh(0.1)"));
    assert_eq!(sorted(out), vec!["es.math.cosh"]);

    let out = classify(["es.math.cosh"], &js("Math.sinh(0.1)"));
    assert!(out.is_empty());
}

#[test]
fn error_cause_requires_two_arguments() {
    let out = classify(["es.error.cause"], &js("new RangeError('foo', { cause: e })"));
    assert_eq!(sorted(out), vec!["es.error.cause"]);

    let out = classify(["es.error.cause"], &js("new RangeError('foo')"));
    assert!(out.is_empty());

    let out = classify(["es.error.cause"], &js(""));
    assert!(out.is_empty());
}

#[test]
fn error_cause_matches_plain_call_form() {
    let out = classify(["es.error.cause"], &js("throw TypeError('bad', { cause })"));
    assert_eq!(sorted(out), vec!["es.error.cause"]);
}

// ---- Aliases ----

#[test]
fn alias_expands_like_its_targets() {
    let tree = js("Promise.resolve(1).then(() => {}); p.catch(log);");
    let via_alias = classify(["es.promise"], &tree);
    let expanded = classify(
        [
            "es.promise.constructor",
            "es.promise.all",
            "es.promise.catch",
            "es.promise.race",
            "es.promise.reject",
            "es.promise.resolve",
        ],
        &tree,
    );
    assert_eq!(sorted(via_alias.clone()), sorted(expanded));
    assert_eq!(
        sorted(via_alias),
        vec!["es.promise.catch", "es.promise.constructor", "es.promise.resolve"]
    );
}

// ---- Method vs property ----

#[test]
fn generic_method_needs_a_call() {
    let candidates = ["es.promise.catch", "es.regexp.flags"];

    let out = classify(candidates, &js("foo.catch(() => 0)"));
    assert_eq!(sorted(out), vec!["es.promise.catch"]);

    let out = classify(candidates, &js("const handler = foo.catch;"));
    assert!(out.is_empty());

    let out = classify(candidates, &js("console.log(re.flags)"));
    assert_eq!(sorted(out), vec!["es.regexp.flags"]);

    let out = classify(candidates, &js("re.flags()"));
    assert!(out.is_empty());
}

#[test]
fn member_passed_as_argument_is_a_property() {
    let out = classify(["es.regexp.flags"], &js("call(re.flags)"));
    assert_eq!(sorted(out), vec!["es.regexp.flags"]);
}

#[test]
fn string_literal_subscript_resolves_like_dot_access() {
    let out = classify(["es.array.is-array"], &js("Array['isArray'](x)"));
    assert_eq!(sorted(out), vec!["es.array.is-array"]);

    let out = classify(["es.array.is-array"], &js("Array[key](x)"));
    assert!(out.is_empty());
}

#[test]
fn parenthesized_callee_is_still_a_method_call() {
    let candidates = ["es.promise.catch", "es.regexp.flags"];

    let out = classify(candidates, &js("(foo.catch)(f)"));
    assert_eq!(sorted(out), vec!["es.promise.catch"]);

    let out = classify(candidates, &js("((foo.flags))(f)"));
    assert!(out.is_empty());

    let out = classify(candidates, &js("(foo.flags);"));
    assert_eq!(sorted(out), vec!["es.regexp.flags"]);
}

#[test]
fn parenthesized_objects_and_constructors_resolve() {
    let out = classify(["es.math.cosh"], &js("(Math).cosh(1)"));
    assert_eq!(sorted(out), vec!["es.math.cosh"]);

    let out = classify(
        ["es.error.cause"],
        &js("new (RangeError)('a', { cause: e })"),
    );
    assert_eq!(sorted(out), vec!["es.error.cause"]);

    let out = classify(["es.error.cause"], &js("(RangeError)('a', { cause: e })"));
    assert_eq!(sorted(out), vec!["es.error.cause"]);
}

#[test]
fn non_null_assertion_is_looked_through() {
    let ts = |source: &str| tree_for(source, Language::TypeScript);

    let out = classify(["es.promise.catch"], &ts("foo!.catch(f)"));
    assert_eq!(sorted(out), vec!["es.promise.catch"]);

    let out = classify(["es.promise.catch"], &ts("foo.catch!(f)"));
    assert_eq!(sorted(out), vec!["es.promise.catch"]);

    let out = classify(["es.math.trunc"], &ts("Math!.trunc(x)"));
    assert_eq!(sorted(out), vec!["es.math.trunc"]);
}

#[test]
fn chained_objects_are_not_resolved() {
    let out = classify(["es.array.includes"], &js("list.items.includes(1)"));
    assert!(out.is_empty());

    let out = classify(["es.array.includes"], &js("items.includes(1)"));
    assert_eq!(sorted(out), vec!["es.array.includes"]);
}

// ---- Scope ----

#[test]
fn shadowed_globals_are_not_detected() {
    let (tree, _) = fixture("js/shadowed.js");
    let out = classify(["es.promise.constructor", "es.map.constructor"], &tree);
    assert!(out.is_empty(), "got {out:?}");
}

#[test]
fn global_in_nested_function_is_detected() {
    let tree = js("function outer() { return () => new WeakMap(); }");
    let out = classify(["es.weak-map"], &tree);
    assert_eq!(sorted(out), vec!["es.weak-map.constructor"]);
}

// ---- Fail-open ----

#[test]
fn ids_without_rules_are_always_kept() {
    let out = classify(["es.string.pad-start", "es.array.at"], &js("x + 1"));
    assert_eq!(sorted(out), vec!["es.string.pad-start"]);
}

// ---- Fixtures ----

#[test]
fn entry_fixture_detects_array_usage() {
    let (tree, _) = fixture("js/entry1.js");
    let out = classify(
        ["es.array.includes", "es.array.is-array", "es.array.at", "es.map"],
        &tree,
    );
    assert_eq!(sorted(out), vec!["es.array.includes", "es.array.is-array"]);
}

#[test]
fn async_fixture_detects_promise_and_cause() {
    let (tree, _) = fixture("js/async-flow.mjs");
    let out = classify(
        [
            "es.promise.all-settled",
            "es.error.cause",
            "es.map.constructor",
            "es.json.stringify",
        ],
        &tree,
    );
    assert_eq!(
        sorted(out),
        vec!["es.error.cause", "es.map.constructor", "es.promise.all-settled"]
    );
}

#[test]
fn typescript_fixture_parses_and_classifies() {
    let (tree, _) = fixture("ts/models.ts");
    let out = classify(
        ["es.map.constructor", "es.array.from", "es.set.constructor"],
        &tree,
    );
    assert_eq!(sorted(out), vec!["es.array.from", "es.map.constructor"]);
}

// ---- Conflict policy ----

#[test]
fn last_registered_static_member_wins_by_default() {
    let tree = js("Math.cosh(1); Math.trunc(2);");
    let out = classify(["es.math.cosh", "es.math.trunc"], &tree);
    assert_eq!(sorted(out), vec!["es.math.trunc"]);
}

#[test]
fn reject_policy_reports_owner_conflict() {
    use polytrim_core::config::MemberConflictPolicy;
    use polytrim_core::errors::CatalogError;

    let classifier = Classifier::builtin().with_policy(MemberConflictPolicy::Reject);
    let tree = js("Math.cosh(1)");
    let err = classifier
        .classify(["es.math.cosh", "es.math.trunc"], &tree)
        .unwrap_err();
    assert!(matches!(err, CatalogError::OwnerConflict { ref owner, .. } if owner == "Math"));

    let out = classifier.classify(["es.math.cosh"], &tree).unwrap();
    assert_eq!(sorted(out), vec!["es.math.cosh"]);
}
