//! Tree projection of JSON values for structural browsing

use serde_json::Value;

/// A labeled node in the response tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(label: impl Into<String>) -> Self {
        TreeNode {
            label: label.into(),
            children: Vec::new(),
        }
    }
}

/// One displayable row of a flattened tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub label: String,
    pub is_leaf: bool,
}

/// Project a JSON value into its top-level nodes.
///
/// Objects give one node per key (insertion order), arrays one node per
/// element labeled `[i]`, scalars a single leaf.
pub fn project(value: &Value) -> Vec<TreeNode> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, child)| TreeNode {
                label: key.clone(),
                children: project(child),
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, child)| TreeNode {
                label: format!("[{}]", i),
                children: project(child),
            })
            .collect(),
        Value::Null => vec![TreeNode::leaf("null")],
        Value::Bool(b) => vec![TreeNode::leaf(b.to_string())],
        Value::Number(n) => vec![TreeNode::leaf(n.to_string())],
        Value::String(s) => vec![TreeNode::leaf(s.clone())],
    }
}

/// Depth-first flattening for an indented outline
pub fn flatten(nodes: &[TreeNode]) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    push_rows(nodes, 0, &mut rows);
    rows
}

fn push_rows(nodes: &[TreeNode], depth: usize, rows: &mut Vec<TreeRow>) {
    for node in nodes {
        rows.push(TreeRow {
            depth,
            label: node.label.clone(),
            is_leaf: node.children.is_empty(),
        });
        push_rows(&node.children, depth + 1, rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_keys_in_insertion_order() {
        let value: Value = serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let labels: Vec<_> = project(&value).into_iter().map(|n| n.label).collect();
        assert_eq!(labels, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_array_indices() {
        let nodes = project(&json!(["a", {"b": null}]));
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].label, "[0]");
        assert_eq!(nodes[0].children, vec![TreeNode::leaf("a")]);
        assert_eq!(nodes[1].label, "[1]");
        assert_eq!(nodes[1].children[0].label, "b");
        assert_eq!(nodes[1].children[0].children, vec![TreeNode::leaf("null")]);
    }

    #[test]
    fn test_scalars() {
        assert_eq!(project(&json!(true)), vec![TreeNode::leaf("true")]);
        assert_eq!(project(&json!(2.5)), vec![TreeNode::leaf("2.5")]);
        assert_eq!(project(&json!("text")), vec![TreeNode::leaf("text")]);
        assert_eq!(project(&Value::Null), vec![TreeNode::leaf("null")]);
    }

    #[test]
    fn test_empty_containers() {
        assert!(project(&json!({})).is_empty());
        assert!(project(&json!([])).is_empty());

        let nodes = project(&json!({"a": {}, "b": []}));
        assert_eq!(nodes, vec![TreeNode::leaf("a"), TreeNode::leaf("b")]);
    }

    #[test]
    fn test_nested_containers_keep_their_labels() {
        let nodes = project(&json!({"a": [[], {"b": {}}]}));
        assert_eq!(nodes.len(), 1);
        let items = &nodes[0].children;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], TreeNode::leaf("[0]"));
        assert_eq!(items[1].label, "[1]");
        assert_eq!(items[1].children, vec![TreeNode::leaf("b")]);
        assert!(flatten(&nodes).iter().all(|row| !row.label.is_empty()));
    }

    #[test]
    fn test_projection_is_repeatable() {
        let value = json!({"user": {"id": 7, "tags": ["x", "y"]}, "ok": false});
        assert_eq!(project(&value), project(&value));
    }

    #[test]
    fn test_flatten_depths() {
        let rows = flatten(&project(&json!({"a": {"b": 1}, "c": 2})));
        let summary: Vec<_> = rows.iter().map(|r| (r.depth, r.label.as_str(), r.is_leaf)).collect();
        assert_eq!(
            summary,
            vec![
                (0, "a", false),
                (1, "b", false),
                (2, "1", true),
                (0, "c", false),
                (1, "2", true),
            ]
        );
    }
}
