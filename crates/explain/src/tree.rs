//! Explanation trees.

use serde::{Deserialize, Serialize};

/// One node of a derivation proof.
///
/// Leaves are base facts, negated goals, references into the subproof cache,
/// or the terminal "not found" messages. Inner nodes are derived tuples whose
/// children follow the rule's body goals from left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        label: String,
    },
    Inner {
        label: String,
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    pub fn leaf(label: impl Into<String>) -> Self {
        TreeNode::Leaf {
            label: label.into(),
        }
    }

    pub fn inner(label: impl Into<String>) -> Self {
        TreeNode::Inner {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TreeNode::Leaf { label } | TreeNode::Inner { label, .. } => label,
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Leaf { .. } => &[],
            TreeNode::Inner { children, .. } => children.as_slice(),
        }
    }

    /// Append a child. Has no effect on a leaf.
    pub fn add_child(&mut self, child: TreeNode) {
        if let TreeNode::Inner { children, .. } = self {
            children.push(child);
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    /// Total number of nodes.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(TreeNode::size).sum::<usize>()
    }

    /// Leaves in left-to-right order.
    pub fn leaves(&self) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a TreeNode>) {
        match self {
            TreeNode::Leaf { .. } => out.push(self),
            TreeNode::Inner { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
