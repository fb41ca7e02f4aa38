//! Error-tolerant parsing: locate ERROR and MISSING nodes in a tree.

use tree_sitter::Node;

use super::types::Range;

/// Count ERROR/MISSING nodes in a tree-sitter tree and collect their ranges.
pub fn count_errors(root: Node) -> (u32, Vec<Range>) {
    let mut count = 0u32;
    let mut ranges = Vec::new();
    if !root.has_error() {
        return (count, ranges);
    }

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            count += 1;
            ranges.push(Range::from_ts_node(&node));
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        stack.extend(node.children(&mut cursor));
    }
    (count, ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> tree_sitter::Tree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    #[test]
    fn test_clean_tree_has_no_errors() {
        let tree = parse("Promise.resolve(1).then(f);");
        assert_eq!(count_errors(tree.root_node()), (0, Vec::new()));
    }

    #[test]
    fn test_broken_statement_is_counted() {
        let tree = parse("let a = ;\nnew Map();");
        let (count, ranges) = count_errors(tree.root_node());
        assert!(count >= 1);
        assert_eq!(ranges.len(), count as usize);
        assert_eq!(ranges[0].start.line, 0);
    }
}
