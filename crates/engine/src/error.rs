use crate::record::Domain;

/// All errors that can be returned by an evaluation engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A relation name that the program does not declare.
    #[error("unknown relation: {name}")]
    UnknownRelation { name: String },

    /// Two relations were declared with the same name.
    #[error("duplicate relation: {name}")]
    DuplicateRelation { name: String },

    /// A tuple or atom has the wrong number of cells for its relation.
    #[error("arity mismatch for {relation}: expected {expected}, got {got}")]
    ArityMismatch {
        relation: String,
        expected: usize,
        got: usize,
    },

    /// A clause names a rule-info relation in its head or body.
    #[error("rule-info relation {name} cannot appear in a clause")]
    InfoRelationInClause { name: String },

    /// A cell does not match the declared attribute type of its column.
    #[error("type mismatch in {relation} column {column}: expected {expected}")]
    TypeMismatch {
        relation: String,
        column: usize,
        expected: String,
    },

    /// The subproof routine found no body assignment that justifies the tuple.
    #[error("no witness for {relation} rule {rule_id}")]
    NoWitness { relation: String, rule_id: Domain },

    /// The program description could not be parsed.
    #[error("invalid program: {0}")]
    Parse(#[from] serde_json::Error),

    /// A backend-specific engine error.
    #[error("engine backend error: {0}")]
    Backend(String),
}
