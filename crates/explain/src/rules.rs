//! Rule metadata recovered from the program's `@info` relations.
//!
//! Every clause of a provenance-instrumented program comes with an auxiliary
//! relation named `<relation>-@info-…` holding a single row: the rule id,
//! one column per body goal (negated goals carry a leading `!`), and the
//! rule's source text. The index is built once and never changes.

use std::collections::BTreeMap;

use provex_engine::{Domain, Program, Value, INFO_MARKER, NEGATION_PREFIX};

use crate::error::ExplainError;

/// One goal in a rule body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyGoal {
    pub relation: String,
    pub negated: bool,
}

impl BodyGoal {
    /// Parse a goal name as stored in an info row.
    pub fn parse(name: &str) -> Self {
        match name.strip_prefix(NEGATION_PREFIX) {
            Some(rest) => BodyGoal {
                relation: rest.to_string(),
                negated: true,
            },
            None => BodyGoal {
                relation: name.to_string(),
                negated: false,
            },
        }
    }

    /// Name as it appears in labels: `!rel` for negated goals.
    pub fn display_name(&self) -> String {
        if self.negated {
            format!("{}{}", NEGATION_PREFIX, self.relation)
        } else {
            self.relation.clone()
        }
    }
}

/// Metadata for one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    pub body: Vec<BodyGoal>,
    pub text: String,
}

/// Index from (relation, rule id) to the rule's body goals and text.
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    rules: BTreeMap<(String, Domain), RuleInfo>,
}

impl RuleIndex {
    /// Scan every `@info` relation of `program`.
    ///
    /// When two rows register the same (relation, rule id) the first one is
    /// kept.
    pub fn build<P: Program + ?Sized>(program: &P) -> Result<Self, ExplainError> {
        let mut rules = BTreeMap::new();

        for rel in program.relations() {
            let name = rel.name();
            if !name.contains(INFO_MARKER) {
                continue;
            }
            let owner = owner_name(name);

            for row in rel.tuples() {
                let (rule_id, info) = parse_info_row(name, &row)?;
                rules.entry((owner.to_string(), rule_id)).or_insert(info);
            }
        }

        Ok(RuleIndex { rules })
    }

    pub fn get(&self, relation: &str, rule_id: Domain) -> Option<&RuleInfo> {
        self.rules.get(&(relation.to_string(), rule_id))
    }

    /// Source text of a rule.
    pub fn rule_text(&self, relation: &str, rule_id: Domain) -> Option<&str> {
        self.get(relation, rule_id).map(|r| r.text.as_str())
    }

    /// All rules of `relation`, ascending by rule id.
    pub fn rules_for<'a>(
        &'a self,
        relation: &'a str,
    ) -> impl Iterator<Item = (Domain, &'a RuleInfo)> + 'a {
        self.rules
            .iter()
            .filter(move |((rel, _), _)| rel == relation)
            .map(|((_, id), info)| (*id, info))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// `path-@info-2` -> `path`
fn owner_name(info_relation: &str) -> &str {
    let marker = format!("-{}", INFO_MARKER);
    match info_relation.find(&marker) {
        Some(end) => &info_relation[..end],
        None => info_relation,
    }
}

fn parse_info_row(relation: &str, row: &[Value]) -> Result<(Domain, RuleInfo), ExplainError> {
    let malformed = |message: String| ExplainError::MalformedRuleInfo {
        relation: relation.to_string(),
        message,
    };

    if row.len() < 2 {
        return Err(malformed(format!(
            "expected at least 2 columns, found {}",
            row.len()
        )));
    }

    let rule_id = row[0]
        .as_number()
        .ok_or_else(|| malformed("rule id is not a number".to_string()))?;

    let last = row.len() - 1;
    let mut body = Vec::with_capacity(last - 1);
    for (i, cell) in row[1..last].iter().enumerate() {
        let goal = cell
            .as_symbol()
            .ok_or_else(|| malformed(format!("body goal {} is not a symbol", i)))?;
        body.push(BodyGoal::parse(goal));
    }

    let text = row[last]
        .as_symbol()
        .ok_or_else(|| malformed("rule text is not a symbol".to_string()))?
        .to_string();

    Ok((rule_id, RuleInfo { body, text }))
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
