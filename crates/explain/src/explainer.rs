//! Proof tree construction.
//!
//! The explainer expands one derivation at a time, depth first. For a
//! derived tuple it asks the engine to recompute the justification of the
//! tuple's rule, decodes the returned witness goal by goal in the order the
//! rule-info relation lists them, and recurses into every positive goal.
//! Negated goals are rendered as leaves. When the depth budget runs out the
//! branch is parked in the subproof cache and replaced by a reference leaf.

use provex_engine::{Domain, Program, Tuple, PROVENANCE_COLUMNS};

use crate::cache::{split_extended, SubproofCache};
use crate::codec::{format_atom, TupleCodec};
use crate::config::ExplainConfig;
use crate::error::{CodecError, ExplainError};
use crate::locator::TupleLocator;
use crate::rules::{RuleIndex, RuleInfo};
use crate::tree::TreeNode;

pub const RELATION_NOT_FOUND: &str = "Relation not found";
pub const TUPLE_NOT_FOUND: &str = "Tuple not found";
pub const SUBPROOF_NOT_FOUND: &str = "Subproof not found";

/// Builds derivation trees for tuples of an evaluated program.
///
/// The rule index is built once at construction. The subproof cache lives as
/// long as the explainer, so reference leaves handed out by one call can be
/// expanded by a later [`Explainer::explain_subproof`].
pub struct Explainer<'p, P: Program + ?Sized> {
    program: &'p P,
    rules: RuleIndex,
    subproofs: SubproofCache,
    config: ExplainConfig,
}

impl<'p, P: Program + ?Sized> Explainer<'p, P> {
    pub fn new(program: &'p P) -> Result<Self, ExplainError> {
        Self::with_config(program, ExplainConfig::default())
    }

    pub fn with_config(program: &'p P, config: ExplainConfig) -> Result<Self, ExplainError> {
        Ok(Explainer {
            program,
            rules: RuleIndex::build(program)?,
            subproofs: SubproofCache::new(),
            config,
        })
    }

    pub fn config(&self) -> &ExplainConfig {
        &self.config
    }

    pub fn subproofs(&self) -> &SubproofCache {
        &self.subproofs
    }

    /// Source text of a rule, if the program registered it.
    pub fn rule_text(&self, relation: &str, rule_id: Domain) -> Option<&str> {
        self.rules.rule_text(relation, rule_id)
    }

    /// Rules of `relation`, ascending by rule id.
    pub fn rules_for<'a>(
        &'a self,
        relation: &'a str,
    ) -> impl Iterator<Item = (Domain, &'a RuleInfo)> + 'a {
        self.rules.rules_for(relation)
    }

    /// Explain `relation(args…)` with the configured depth budget.
    pub fn explain_default<S: AsRef<str>>(
        &mut self,
        relation: &str,
        args: &[S],
    ) -> Result<TreeNode, ExplainError> {
        let depth = self.config.depth_limit;
        self.explain(relation, args, depth)
    }

    /// Explain `relation(args…)`.
    ///
    /// An unknown relation, an argument list that cannot name a stored tuple,
    /// or a tuple with no stored derivation all produce a single leaf.
    pub fn explain<S: AsRef<str>>(
        &mut self,
        relation: &str,
        args: &[S],
        depth: usize,
    ) -> Result<TreeNode, ExplainError> {
        let tuple = match TupleCodec::new(self.program).args_to_tuple(relation, args) {
            Ok(tuple) => tuple,
            Err(CodecError::UnknownRelation { .. }) => {
                return Ok(TreeNode::leaf(RELATION_NOT_FOUND))
            }
            Err(_) => return Ok(TreeNode::leaf(TUPLE_NOT_FOUND)),
        };

        let derivation = match TupleLocator::new(self.program).find_derivation(relation, &tuple) {
            Some(d) if d.rule_id >= 0 && d.level >= 0 => d,
            _ => return Ok(TreeNode::leaf(TUPLE_NOT_FOUND)),
        };

        self.explain_derivation(relation, tuple, derivation.rule_id, derivation.level, depth)
    }

    /// Re-expand a branch previously cut off into the subproof cache.
    pub fn explain_subproof(
        &mut self,
        relation: &str,
        index: usize,
        depth: usize,
    ) -> Result<TreeNode, ExplainError> {
        let Some((user, rule_id, level)) = self.subproofs.get(index).and_then(split_extended)
        else {
            return Ok(TreeNode::leaf(SUBPROOF_NOT_FOUND));
        };
        let tuple = user.to_vec();
        self.explain_derivation(relation, tuple, rule_id, level, depth)
    }

    /// Expand one derivation of `relation(tuple)` produced by `rule_id` at
    /// `level`.
    pub fn explain_derivation(
        &mut self,
        relation: &str,
        mut tuple: Tuple,
        rule_id: Domain,
        level: Domain,
        depth: usize,
    ) -> Result<TreeNode, ExplainError> {
        let codec = TupleCodec::new(self.program);
        let label = format_atom(relation, &codec.tuple_to_args(relation, &tuple, None)?);

        if level == 0 {
            return Ok(TreeNode::leaf(label));
        }

        let body = match self.rules.get(relation, rule_id) {
            Some(info) => info.body.clone(),
            None => {
                return Err(ExplainError::MissingRuleInfo {
                    relation: relation.to_string(),
                    rule_id,
                })
            }
        };

        if depth <= 1 {
            tuple.push(rule_id);
            tuple.push(level);
            let idx = self.subproofs.insert_or_find(tuple);
            return Ok(TreeNode::leaf(format!("subproof {}({})", relation, idx)));
        }

        let mut node = TreeNode::inner(label);

        tuple.push(level);
        let routine = self.program.subproof_routine(relation, rule_id).ok_or_else(|| {
            ExplainError::MissingSubproofRoutine {
                relation: relation.to_string(),
                rule_id,
            }
        })?;
        let witness = routine.run(&tuple)?;

        let mut cursor = 0;
        for goal in &body {
            let goal_rel = self.program.relation(&goal.relation).ok_or_else(|| {
                ExplainError::UnknownGoalRelation {
                    relation: relation.to_string(),
                    rule_id,
                    goal: goal.relation.clone(),
                }
            })?;
            let arity = goal_rel.arity();
            let user = arity.checked_sub(PROVENANCE_COLUMNS).ok_or_else(|| {
                ExplainError::MalformedRuleInfo {
                    relation: relation.to_string(),
                    message: format!(
                        "goal {} has no provenance columns",
                        goal.relation
                    ),
                }
            })?;
            let end = cursor + arity;
            if witness.values.len() < end || witness.wildcards.len() < cursor + user {
                return Err(ExplainError::WitnessTooShort {
                    relation: relation.to_string(),
                    rule_id,
                    needed: end,
                    available: witness.values.len(),
                });
            }

            let goal_tuple = witness.values[cursor..cursor + user].to_vec();
            let goal_flags = &witness.wildcards[cursor..cursor + user];

            if goal.negated {
                let args = codec.tuple_to_args(&goal.relation, &goal_tuple, Some(goal_flags))?;
                node.add_child(TreeNode::leaf(format_atom(&goal.display_name(), &args)));
            } else {
                let goal_rule = witness.values[cursor + user];
                let goal_level = witness.values[cursor + user + 1];
                let child = self.explain_derivation(
                    &goal.relation,
                    goal_tuple,
                    goal_rule,
                    goal_level,
                    depth - 1,
                )?;
                node.add_child(child);
            }

            cursor = end;
        }

        Ok(node)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
