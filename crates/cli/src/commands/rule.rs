use std::path::Path;

use provex_engine::Domain;
use provex_explain::{RuleIndex, RuleInfo};

use crate::commands::load_program;
use crate::{fail, OutputFormat};

pub(crate) fn cmd_rule(
    program_path: &Path,
    relation: &str,
    rule_id: Option<Domain>,
    output: OutputFormat,
    quiet: bool,
) {
    let program = load_program(program_path, output, quiet);

    let index = match RuleIndex::build(&program) {
        Ok(i) => i,
        Err(e) => fail(&format!("error: {}", e), output, quiet),
    };

    let rules: Vec<(Domain, &RuleInfo)> = match rule_id {
        Some(id) => index
            .get(relation, id)
            .map(|info| vec![(id, info)])
            .unwrap_or_default(),
        None => index.rules_for(relation).collect(),
    };

    if rules.is_empty() {
        let msg = match rule_id {
            Some(id) => format!("error: relation '{}' has no rule {}", relation, id),
            None => format!("error: relation '{}' has no rules", relation),
        };
        fail(&msg, output, quiet);
    }

    match output {
        OutputFormat::Text => {
            for (id, info) in &rules {
                if rule_id.is_some() {
                    println!("{}", info.text);
                } else {
                    println!("{}: {}", id, info.text);
                }
            }
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = rules
                .iter()
                .map(|(id, info)| {
                    let body: Vec<String> = info.body.iter().map(|g| g.display_name()).collect();
                    serde_json::json!({
                        "id": id,
                        "text": info.text,
                        "body": body,
                    })
                })
                .collect();
            let value = serde_json::json!({
                "relation": relation,
                "rules": entries,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            );
        }
    }
}
