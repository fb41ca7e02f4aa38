//! Lowers a tree-sitter ECMAScript tree into a `SyntaxTree`.
//!
//! Only named nodes are kept. Node kinds the usage matcher does not inspect
//! become `NodeKind::Other`, so parent links and traversal still cover the
//! whole program.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tree_sitter::Node;

use super::builder::SyntaxTreeBuilder;
use super::scope::global_references;
use super::types::{is_transparent, NodeId, NodeKind, PropertyKey, SyntaxTree};
use crate::parsers::types::Range;

/// Normalize the tree rooted at `root` (a `program` node) parsed from `source`.
pub fn normalize(root: Node<'_>, source: &str) -> SyntaxTree {
    let source = source.as_bytes();
    let globals = global_references(root, source);

    let mut builder = SyntaxTreeBuilder::with_capacity(globals, root.descendant_count());
    builder.set_root_range(Range::from_ts_node(&root));

    // Pass 1: allocate ids in pre-order so arena order is source order.
    let mut ids: FxHashMap<usize, NodeId> = FxHashMap::default();
    ids.insert(root.id(), builder.root());
    let mut order: Vec<(Node<'_>, NodeId)> = Vec::new();
    let mut stack: Vec<(Node<'_>, NodeId)> = Vec::new();
    push_children(&mut stack, root, builder.root());

    while let Some((node, parent)) = stack.pop() {
        let id = builder.push(
            parent,
            NodeKind::Other { kind: node.kind() },
            Range::from_ts_node(&node),
        );
        ids.insert(node.id(), id);
        order.push((node, id));
        push_children(&mut stack, node, id);
    }

    // Pass 2: kinds that reference other nodes, now that every id exists.
    for (node, id) in order {
        if let Some(kind) = lower(node, source, &ids) {
            builder.set_kind(id, kind);
        }
    }

    let tree = builder.build();
    tracing::trace!(nodes = tree.len(), "normalized syntax tree");
    tree
}

fn push_children<'t>(stack: &mut Vec<(Node<'t>, NodeId)>, node: Node<'t>, id: NodeId) {
    let mut cursor = node.walk();
    let children: SmallVec<[Node<'t>; 8]> = node.named_children(&mut cursor).collect();
    stack.extend(children.into_iter().rev().map(|child| (child, id)));
}

/// Lowered kind for `node`, or `None` to keep the `Other` placeholder.
fn lower(node: Node<'_>, source: &[u8], ids: &FxHashMap<usize, NodeId>) -> Option<NodeKind> {
    let id_of = |n: Node<'_>| ids.get(&n.id()).copied();

    match node.kind() {
        "identifier" | "shorthand_property_identifier" => Some(NodeKind::Identifier {
            name: node.utf8_text(source).ok()?.to_string(),
        }),
        "string" => Some(NodeKind::StringLiteral {
            value: decode_string(node, source)?,
        }),
        "spread_element" => {
            let mut cursor = node.walk();
            let argument = node.named_children(&mut cursor).next()?;
            Some(NodeKind::Spread {
                argument: id_of(argument)?,
            })
        }
        "call_expression" => {
            let callee = id_of(unwrap_transparent(node.child_by_field_name("function")?))?;
            let arguments = node.child_by_field_name("arguments")?;
            // tag`...` carries a template, not an argument list.
            if arguments.kind() != "arguments" {
                return Some(NodeKind::Other {
                    kind: "tagged_template",
                });
            }
            Some(NodeKind::Call {
                callee,
                arguments: argument_ids(arguments, ids),
            })
        }
        "new_expression" => {
            let callee = id_of(unwrap_transparent(node.child_by_field_name("constructor")?))?;
            let arguments = node
                .child_by_field_name("arguments")
                .map(|args| argument_ids(args, ids))
                .unwrap_or_default();
            Some(NodeKind::New { callee, arguments })
        }
        "member_expression" => {
            let object = id_of(unwrap_transparent(node.child_by_field_name("object")?))?;
            let property = node.child_by_field_name("property")?;
            let property = match property.kind() {
                "property_identifier" => {
                    PropertyKey::Identifier(property.utf8_text(source).ok()?.to_string())
                }
                _ => PropertyKey::Computed,
            };
            Some(NodeKind::Member { object, property })
        }
        "subscript_expression" => {
            let object = id_of(unwrap_transparent(node.child_by_field_name("object")?))?;
            let property = node
                .child_by_field_name("index")
                .filter(|index| index.kind() == "string")
                .and_then(|index| decode_string(index, source))
                .map_or(PropertyKey::Computed, PropertyKey::StringLiteral);
            Some(NodeKind::Member { object, property })
        }
        _ => None,
    }
}

/// The expression inside any `(...)` / `expr!` wrappers around `node`.
fn unwrap_transparent(mut node: Node<'_>) -> Node<'_> {
    while is_transparent(node.kind()) {
        let mut cursor = node.walk();
        let inner = node
            .named_children(&mut cursor)
            .find(|child| child.kind() != "comment");
        match inner {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

fn argument_ids(arguments: Node<'_>, ids: &FxHashMap<usize, NodeId>) -> SmallVec<[NodeId; 4]> {
    let mut cursor = arguments.walk();
    arguments
        .named_children(&mut cursor)
        .filter(|arg| arg.kind() != "comment")
        .filter_map(|arg| ids.get(&arg.id()).copied())
        .collect()
}

/// Cooked value of a string literal node. `None` if an escape cannot be
/// decoded statically.
fn decode_string(node: Node<'_>, source: &[u8]) -> Option<String> {
    let mut value = String::new();
    let mut cursor = node.walk();
    for part in node.named_children(&mut cursor) {
        let text = part.utf8_text(source).ok()?;
        match part.kind() {
            "string_fragment" => value.push_str(text),
            "escape_sequence" => value.push_str(&decode_escape(text)?),
            // HTML entities in JSX attribute strings and the like
            _ => return None,
        }
    }
    Some(value)
}

fn decode_escape(escape: &str) -> Option<String> {
    let body = escape.strip_prefix('\\')?;
    let mut chars = body.chars();
    let first = chars.next()?;
    let decoded = match first {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'v' => '\u{b}',
        '0' if body.len() == 1 => '\0',
        'x' => char::from_u32(u32::from_str_radix(chars.as_str(), 16).ok()?)?,
        'u' => {
            let hex = chars.as_str();
            let hex = hex
                .strip_prefix('{')
                .and_then(|h| h.strip_suffix('}'))
                .unwrap_or(hex);
            char::from_u32(u32::from_str_radix(hex, 16).ok()?)?
        }
        // Line continuation
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => return Some(String::new()),
        c if !c.is_ascii_digit() => c,
        _ => return None,
    };
    Some(decoded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::Language;

    fn lower_source(source: &str) -> SyntaxTree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&Language::JavaScript.ts_language())
            .unwrap();
        let tree = parser.parse(source, None).unwrap();
        normalize(tree.root_node(), source)
    }

    fn members(tree: &SyntaxTree) -> Vec<PropertyKey> {
        tree.nodes()
            .filter_map(|(_, n)| match &n.kind {
                NodeKind::Member { property, .. } => Some(property.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_decode_escape() {
        assert_eq!(decode_escape("\\n").as_deref(), Some("\n"));
        assert_eq!(decode_escape("\\x41").as_deref(), Some("A"));
        assert_eq!(decode_escape("\\u0041").as_deref(), Some("A"));
        assert_eq!(decode_escape("\\u{1F600}").as_deref(), Some("\u{1F600}"));
        assert_eq!(decode_escape("\\'").as_deref(), Some("'"));
        assert_eq!(decode_escape("\\7"), None);
    }

    #[test]
    fn test_subscript_string_key_resolves() {
        let tree = lower_source(r#"re["fl\x61gs"]; re[key]; re.flags;"#);
        assert_eq!(
            members(&tree),
            vec![
                PropertyKey::StringLiteral("flags".into()),
                PropertyKey::Computed,
                PropertyKey::Identifier("flags".into()),
            ]
        );
    }

    #[test]
    fn test_optional_chain_member() {
        let tree = lower_source("a?.at(0);");
        assert_eq!(members(&tree), vec![PropertyKey::Identifier("at".into())]);
        let member = tree
            .nodes()
            .find(|(_, n)| matches!(n.kind, NodeKind::Member { .. }))
            .map(|(id, _)| id)
            .unwrap();
        assert!(tree.is_call_callee(member));
    }

    #[test]
    fn test_call_arguments_and_spread() {
        let tree = lower_source("f(a, /* c */ ...b);");
        let (_, call) = tree
            .nodes()
            .find(|(_, n)| matches!(n.kind, NodeKind::Call { .. }))
            .unwrap();
        let NodeKind::Call { arguments, .. } = &call.kind else {
            unreachable!()
        };
        assert_eq!(arguments.len(), 2);
        assert!(matches!(
            tree.kind(arguments[1]),
            Some(NodeKind::Spread { .. })
        ));
    }

    #[test]
    fn test_parenthesized_callee_and_object() {
        let tree = lower_source("(a.b)(1); new (Err)(2); ((Math)).cosh;");
        let member_ids: Vec<NodeId> = tree
            .nodes()
            .filter(|(_, n)| matches!(n.kind, NodeKind::Member { .. }))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(member_ids.len(), 2);
        assert!(tree.is_call_callee(member_ids[0]));
        assert!(!tree.is_call_callee(member_ids[1]));

        let Some(NodeKind::Member { object, .. }) = tree.kind(member_ids[1]) else {
            unreachable!()
        };
        assert_eq!(tree.identifier_name(*object), Some("Math"));

        let (_, new) = tree
            .nodes()
            .find(|(_, n)| matches!(n.kind, NodeKind::New { .. }))
            .unwrap();
        let NodeKind::New { callee, .. } = &new.kind else {
            unreachable!()
        };
        assert_eq!(tree.identifier_name(*callee), Some("Err"));
    }

    #[test]
    fn test_sequence_callee_is_not_unwrapped() {
        let tree = lower_source("(0, a.b)(1);");
        let (member, _) = tree
            .nodes()
            .find(|(_, n)| matches!(n.kind, NodeKind::Member { .. }))
            .unwrap();
        assert!(!tree.is_call_callee(member));
    }

    #[test]
    fn test_tagged_template_is_not_a_call() {
        let tree = lower_source("String.raw`x`;");
        assert!(!tree
            .nodes()
            .any(|(_, n)| matches!(n.kind, NodeKind::Call { .. })));
    }

    #[test]
    fn test_parent_links_cover_every_node() {
        let tree = lower_source("const x = new Map([[1, 2]]); x.get(1);");
        for (id, node) in tree.nodes().skip(1) {
            let parent = node.parent.unwrap();
            assert!(tree.node(parent).unwrap().children.contains(&id));
        }
        assert!(tree.is_global("Map"));
        assert!(!tree.is_global("x"));
    }
}
