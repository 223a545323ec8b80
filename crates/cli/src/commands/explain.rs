use std::path::Path;

use provex_explain::{ExplainConfig, Explainer, TreeNode};

use crate::commands::load_program;
use crate::render::render_tree;
use crate::{fail, OutputFormat};

pub(crate) struct ExplainOptions<'a> {
    /// Overrides `settings.depth_limit` when given.
    pub depth: Option<usize>,
    pub expand: &'a [String],
    /// Budget for each expansion; `settings.depth_limit` when absent.
    pub expand_depth: Option<usize>,
    pub settings: ExplainConfig,
    pub verbose: bool,
}

pub(crate) fn cmd_explain(
    program_path: &Path,
    relation: &str,
    args: &[String],
    options: ExplainOptions<'_>,
    output: OutputFormat,
    quiet: bool,
) {
    let program = load_program(program_path, output, quiet);

    let mut explainer = match Explainer::with_config(&program, options.settings) {
        Ok(e) => e,
        Err(e) => fail(&format!("error: {}", e), output, quiet),
    };
    let depth = options.depth.unwrap_or(explainer.config().depth_limit);
    let expand_depth = options
        .expand_depth
        .unwrap_or(explainer.config().depth_limit);

    let tree = match explainer.explain(relation, args, depth) {
        Ok(t) => t,
        Err(e) => fail(&format!("explain error: {}", e), output, quiet),
    };

    // Expansions share the session, so indices from `tree` stay valid.
    let mut expanded: Vec<(&str, TreeNode)> = Vec::new();
    for reference in options.expand {
        let Some((rel, index)) = parse_reference(reference) else {
            fail(
                &format!(
                    "error: invalid subproof reference '{}', expected rel(idx)",
                    reference
                ),
                output,
                quiet,
            );
        };
        match explainer.explain_subproof(rel, index, expand_depth) {
            Ok(t) => expanded.push((reference.as_str(), t)),
            Err(e) => fail(&format!("explain error: {}", e), output, quiet),
        }
    }

    if options.verbose && !quiet {
        eprintln!(
            "subproof cache: {} entries",
            explainer.subproofs().len()
        );
    }

    match output {
        OutputFormat::Text => {
            print!("{}", render_tree(&tree));
            for (reference, subtree) in &expanded {
                println!();
                println!("{}:", reference);
                print!("{}", render_tree(subtree));
            }
        }
        OutputFormat::Json => {
            let value = if expanded.is_empty() {
                tree.to_json()
            } else {
                let subproofs: Vec<serde_json::Value> = expanded
                    .iter()
                    .map(|(reference, subtree)| {
                        serde_json::json!({
                            "reference": reference,
                            "tree": subtree.to_json(),
                        })
                    })
                    .collect();
                serde_json::json!({
                    "tree": tree.to_json(),
                    "subproofs": subproofs,
                })
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            );
        }
    }
}

/// `path(3)` or the full leaf label `subproof path(3)` -> ("path", 3)
fn parse_reference(reference: &str) -> Option<(&str, usize)> {
    let reference = reference.trim();
    let reference = reference.strip_prefix("subproof ").unwrap_or(reference);
    let (rel, rest) = reference.split_once('(')?;
    let index = rest.strip_suffix(')')?.trim().parse().ok()?;
    let rel = rel.trim();
    if rel.is_empty() {
        return None;
    }
    Some((rel, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_forms() {
        assert_eq!(parse_reference("path(0)"), Some(("path", 0)));
        assert_eq!(parse_reference("subproof path(12)"), Some(("path", 12)));
        assert_eq!(parse_reference(" safe( 3 ) "), Some(("safe", 3)));
    }

    #[test]
    fn malformed_references() {
        assert_eq!(parse_reference("path"), None);
        assert_eq!(parse_reference("path(x)"), None);
        assert_eq!(parse_reference("path(-1)"), None);
        assert_eq!(parse_reference("(1)"), None);
        assert_eq!(parse_reference("path(1"), None);
    }
}
