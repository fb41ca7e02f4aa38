//! Global-binding resolution over a tree-sitter ECMAScript tree.
//!
//! Two iterative passes. The first records every declaration in the scope
//! that owns it (hoisting included), the second resolves each identifier
//! reference against its chain of enclosing scopes. Whatever resolves nowhere
//! is a global reference.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tree_sitter::Node;

type ScopeMap = FxHashMap<usize, FxHashSet<String>>;

/// Entry on the scope chain: tree-sitter node id plus whether `var`
/// declarations hoist to it.
#[derive(Debug, Clone, Copy)]
struct ScopeFrame {
    id: usize,
    function: bool,
}

/// Names referenced in the program without a declaration in any enclosing
/// scope.
pub fn global_references(root: Node<'_>, source: &[u8]) -> FxHashSet<String> {
    let scopes = collect_declarations(root, source);
    resolve_references(root, source, &scopes)
}

fn is_function_scope(kind: &str) -> bool {
    matches!(
        kind,
        "program"
            | "function_declaration"
            | "function_expression"
            | "function"
            | "generator_function"
            | "generator_function_declaration"
            | "arrow_function"
            | "method_definition"
            | "class_static_block"
    )
}

fn is_scope(kind: &str) -> bool {
    is_function_scope(kind)
        || matches!(
            kind,
            "statement_block"
                | "class"
                | "class_declaration"
                | "abstract_class_declaration"
                | "for_statement"
                | "for_in_statement"
                | "catch_clause"
                | "switch_body"
        )
}

fn text<'s>(node: Node<'_>, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or("")
}

fn named_children<'t>(node: Node<'t>) -> SmallVec<[Node<'t>; 8]> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn collect_declarations(root: Node<'_>, source: &[u8]) -> ScopeMap {
    let mut scopes = ScopeMap::default();
    let mut chain: Vec<ScopeFrame> = Vec::new();
    let mut stack = vec![(root, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        chain.truncate(depth);
        let kind = node.kind();

        let root_scope = chain.first().map_or(node.id(), |f| f.id);
        let enclosing = chain.last().map_or(root_scope, |f| f.id);
        let enclosing_function = chain
            .iter()
            .rev()
            .find(|f| f.function)
            .map_or(root_scope, |f| f.id);

        if is_scope(kind) {
            scopes.entry(node.id()).or_default();
            chain.push(ScopeFrame {
                id: node.id(),
                function: is_function_scope(kind),
            });
        }

        let mut declare = |scope: usize, pattern: Node<'_>| {
            let names = scopes.entry(scope).or_default();
            for name in pattern_names(pattern, source) {
                names.insert(name);
            }
        };

        match kind {
            "variable_declaration" | "lexical_declaration" => {
                let target = if kind == "variable_declaration" {
                    enclosing_function
                } else {
                    enclosing
                };
                for declarator in named_children(node) {
                    if let Some(name) = declarator.child_by_field_name("name") {
                        declare(target, name);
                    }
                }
            }
            "function_declaration"
            | "generator_function_declaration"
            | "class_declaration"
            | "abstract_class_declaration"
            | "enum_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    declare(enclosing, name);
                }
            }
            "function_expression" | "function" | "generator_function" | "class" => {
                // A named function or class expression binds its own name
                // inside itself only.
                if let Some(name) = node.child_by_field_name("name") {
                    declare(node.id(), name);
                }
            }
            "catch_clause" => {
                if let Some(param) = node.child_by_field_name("parameter") {
                    declare(node.id(), param);
                }
            }
            "for_in_statement" => {
                if let (Some(decl_kind), Some(left)) = (
                    node.child_by_field_name("kind"),
                    node.child_by_field_name("left"),
                ) {
                    let target = if text(decl_kind, source) == "var" {
                        enclosing_function
                    } else {
                        node.id()
                    };
                    declare(target, left);
                }
            }
            "import_clause" | "import_require_clause" => {
                for child in named_children(node) {
                    match child.kind() {
                        "identifier" => declare(root_scope, child),
                        "namespace_import" => {
                            for inner in named_children(child) {
                                declare(root_scope, inner);
                            }
                        }
                        "named_imports" => {
                            for spec in named_children(child) {
                                let local = spec
                                    .child_by_field_name("alias")
                                    .or_else(|| spec.child_by_field_name("name"));
                                if let Some(local) = local {
                                    declare(root_scope, local);
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }

        if is_function_scope(kind) && kind != "program" && kind != "class_static_block" {
            if let Some(params) = node.child_by_field_name("parameters") {
                declare(node.id(), params);
            }
            // `x => x` has a single bare parameter.
            if let Some(param) = node.child_by_field_name("parameter") {
                declare(node.id(), param);
            }
            if kind != "arrow_function" {
                scopes
                    .entry(node.id())
                    .or_default()
                    .insert("arguments".to_string());
            }
        }

        let children = named_children(node);
        for child in children.into_iter().rev() {
            stack.push((child, chain.len()));
        }
    }
    scopes
}

/// Binding names introduced by a declaration pattern.
fn pattern_names(pattern: Node<'_>, source: &[u8]) -> SmallVec<[String; 2]> {
    let mut names = SmallVec::new();
    let mut stack = vec![pattern];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "identifier" | "type_identifier" | "shorthand_property_identifier_pattern" => {
                names.push(text(node, source).to_string());
            }
            "object_pattern" | "array_pattern" | "rest_pattern" | "formal_parameters" => {
                stack.extend(named_children(node));
            }
            "pair_pattern" => stack.extend(node.child_by_field_name("value")),
            "object_assignment_pattern" | "assignment_pattern" => {
                stack.extend(node.child_by_field_name("left"));
            }
            "required_parameter" | "optional_parameter" => {
                stack.extend(node.child_by_field_name("pattern"));
            }
            _ => {}
        }
    }
    names
}

fn resolve_references(root: Node<'_>, source: &[u8], scopes: &ScopeMap) -> FxHashSet<String> {
    let mut globals = FxHashSet::default();
    let mut chain: Vec<usize> = Vec::new();
    let mut stack = vec![(root, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        chain.truncate(depth);
        let kind = node.kind();
        if is_scope(kind) {
            chain.push(node.id());
        }

        if matches!(kind, "identifier" | "shorthand_property_identifier") {
            let name = text(node, source);
            if !name.is_empty() && is_reference(node, name) {
                let bound = chain
                    .iter()
                    .rev()
                    .any(|id| scopes.get(id).is_some_and(|names| names.contains(name)));
                if !bound {
                    globals.insert(name.to_string());
                }
            }
        }

        let children = named_children(node);
        for child in children.into_iter().rev() {
            stack.push((child, chain.len()));
        }
    }
    globals
}

/// Filters identifier positions that name something other than a binding in
/// this module.
fn is_reference(node: Node<'_>, name: &str) -> bool {
    let Some(parent) = node.parent() else {
        return true;
    };
    match parent.kind() {
        "import_specifier" | "namespace_export" => false,
        "export_specifier" => {
            let is_alias = parent
                .child_by_field_name("alias")
                .is_some_and(|alias| alias.id() == node.id());
            let re_export = parent
                .parent()
                .and_then(|clause| clause.parent())
                .is_some_and(|stmt| stmt.child_by_field_name("source").is_some());
            !is_alias && !re_export
        }
        // `<div>` names an intrinsic element, `<Widget>` a binding.
        "jsx_opening_element" | "jsx_closing_element" | "jsx_self_closing_element" => {
            !name.starts_with(|c: char| c.is_ascii_lowercase())
        }
        _ => true,
    }
}
