//! Error types for the explainer.
//!
//! Conditions a user can cause (unknown relation, absent tuple, stale
//! subproof index) never show up here: the explainer reports them as leaf
//! nodes. These errors mean the rule metadata, the relation contents and the
//! engine's subproof routines disagree with each other.

use provex_engine::{Domain, EngineError};

/// Failures converting between literal arguments and raw tuples.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("relation not found: {relation}")]
    UnknownRelation { relation: String },

    #[error("{relation} takes {expected} arguments, got {got}")]
    ArityMismatch {
        relation: String,
        expected: usize,
        got: usize,
    },

    /// The literal was never interned by the engine.
    #[error("unknown symbol '{literal}'")]
    UnknownSymbol { literal: String },

    #[error("invalid number '{literal}'")]
    InvalidNumber { literal: String },

    #[error("symbol id {id} is not interned")]
    UnknownSymbolId { id: Domain },
}

/// Internal consistency violations raised while building a proof tree.
#[derive(Debug, thiserror::Error)]
pub enum ExplainError {
    /// A derived tuple names a rule the metadata index never registered.
    #[error("no rule info for {relation} rule {rule_id}")]
    MissingRuleInfo { relation: String, rule_id: Domain },

    /// A rule-info relation row does not follow the id/goals/text layout.
    #[error("malformed rule info in {relation}: {message}")]
    MalformedRuleInfo { relation: String, message: String },

    /// The engine exposes no subproof capability for a registered rule.
    #[error("no subproof routine for {relation} rule {rule_id}")]
    MissingSubproofRoutine { relation: String, rule_id: Domain },

    /// A body goal names a relation the program does not have.
    #[error("rule {rule_id} of {relation} refers to unknown relation {goal}")]
    UnknownGoalRelation {
        relation: String,
        rule_id: Domain,
        goal: String,
    },

    /// The witness returned by a subproof routine ran out of cells.
    #[error("witness for {relation} rule {rule_id} is too short: need {needed} cells, have {available}")]
    WitnessTooShort {
        relation: String,
        rule_id: Domain,
        needed: usize,
        available: usize,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
