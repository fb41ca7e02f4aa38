//! Global-binding resolution over parsed sources.

use std::path::Path;

use polytrim_analysis::syntax::scope::global_references;
use polytrim_analysis::{JavaScriptParser, Language};
use polytrim_core::types::FxHashSet;

fn globals(source: &str, language: Language) -> FxHashSet<String> {
    let mut parser = JavaScriptParser::new(language).unwrap();
    let parsed = parser.parse(source, Path::new("scope-input")).unwrap();
    global_references(parsed.tree.root_node(), source.as_bytes())
}

fn js(source: &str) -> FxHashSet<String> {
    globals(source, Language::JavaScript)
}

#[test]
fn parameters_shadow_globals() {
    let g = js("function f(Promise, { Map }, [Set], ...WeakMap) { Promise; Map; Set; WeakMap; }");
    for name in ["Promise", "Map", "Set", "WeakMap"] {
        assert!(!g.contains(name), "{name} should be local");
    }
}

#[test]
fn arrow_single_parameter_shadows() {
    let g = js("const f = Symbol => Symbol('x');");
    assert!(!g.contains("Symbol"));
}

#[test]
fn default_parameter_value_is_a_reference() {
    let g = js("function f(a = Number.EPSILON) { return a; }");
    assert!(g.contains("Number"));
    assert!(!g.contains("a"));
}

#[test]
fn function_declarations_hoist() {
    let g = js("use(); function use() { return DataView; }");
    assert!(!g.contains("use"));
    assert!(g.contains("DataView"));
}

#[test]
fn named_function_expression_binds_only_inside() {
    let g = js("const a = function Reflect() { return Reflect; }; Reflect;");
    assert!(g.contains("Reflect"));

    let g = js("const a = function Reflect() { return Reflect; };");
    assert!(!g.contains("Reflect"));
}

#[test]
fn catch_parameter_is_clause_local() {
    let g = js("try { f(); } catch (AggregateError) { AggregateError; }");
    assert!(!g.contains("AggregateError"));

    let g = js("try { f(); } catch (e) {} e;");
    assert!(g.contains("e"));
}

#[test]
fn imports_bind_at_module_level() {
    let g = js("import Map, { Set as LocalSet } from 'x'; import * as Promise from 'y';\n\
                new Map(); new LocalSet(); Promise.all([]); Set;");
    assert!(!g.contains("Map"));
    assert!(!g.contains("LocalSet"));
    assert!(!g.contains("Promise"));
    assert!(g.contains("Set"));
}

#[test]
fn property_names_and_labels_are_not_references() {
    let g = js("const o = { Map: 1 }; o.Set; outer: for (;;) { break outer; }");
    assert!(!g.contains("Map"));
    assert!(!g.contains("Set"));
    assert!(!g.contains("outer"));
}

#[test]
fn shorthand_property_is_a_reference() {
    let g = js("const o = { Promise };");
    assert!(g.contains("Promise"));
}

#[test]
fn implicit_arguments_object() {
    let g = js("function f() { return arguments.length; }");
    assert!(!g.contains("arguments"));

    let g = js("const f = () => arguments;");
    assert!(g.contains("arguments"));
}

#[test]
fn export_aliases_are_not_references() {
    let g = js("const local = 1; export { local as Map };");
    assert!(!g.contains("Map"));
    assert!(!g.contains("local"));

    let g = js("export { Set } from './set.js';");
    assert!(!g.contains("Set"));
}

#[test]
fn typescript_types_are_not_value_references() {
    let g = globals(
        "const m: Map<string, Set<number>> = new Map(); class WeakRef {} new WeakRef();",
        Language::TypeScript,
    );
    assert!(g.contains("Map"));
    assert!(!g.contains("Set"));
    assert!(!g.contains("WeakRef"));
}

#[test]
fn for_of_binding_scopes() {
    let g = js("for (const Symbol of list) { Symbol; } Symbol;");
    assert!(g.contains("Symbol"));
    assert!(g.contains("list"));

    let g = js("function f() { for (var Symbol in o) {} return Symbol; }");
    assert!(!g.contains("Symbol"));
}
