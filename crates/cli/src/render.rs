//! Plain-text rendering of proof trees.

use provex_explain::TreeNode;

/// One label per line, children indented two spaces below their parent.
pub(crate) fn render_tree(tree: &TreeNode) -> String {
    let mut out = String::new();
    write_node(tree, 0, &mut out);
    out
}

fn write_node(node: &TreeNode, indent: usize, out: &mut String) {
    for _ in 0..indent {
        out.push_str("  ");
    }
    out.push_str(node.label());
    out.push('\n');
    for child in node.children() {
        write_node(child, indent + 1, out);
    }
}
