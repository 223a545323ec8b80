use crate::error::EngineError;
use crate::record::{AttributeType, Domain, Value, Witness};

/// A named relation of an evaluated program.
///
/// For relations instrumented with provenance the final two columns hold the
/// rule id and the derivation level of each tuple.
pub trait Relation {
    fn name(&self) -> &str;

    /// Number of columns, provenance columns included.
    fn arity(&self) -> usize;

    /// Type tag of column `i`, or `None` past the end.
    fn attribute_type(&self, i: usize) -> Option<AttributeType>;

    /// Stored tuples in a stable order.
    fn tuples(&self) -> Box<dyn Iterator<Item = Vec<Value>> + '_>;
}

/// The engine's value-interning service.
pub trait SymbolTable {
    /// Text of an interned symbol.
    fn resolve(&self, id: Domain) -> Option<&str>;

    /// Id of an already interned symbol. Never interns.
    fn lookup_existing(&self, symbol: &str) -> Option<Domain>;
}

/// Recomputes the justification of one rule for a given head tuple.
pub trait SubproofRoutine {
    /// `input` is the head tuple's user cells followed by its level.
    ///
    /// The returned witness covers every body goal of the rule, in the order
    /// the rule's info relation lists them.
    fn run(&self, input: &[Domain]) -> Result<Witness, EngineError>;
}

/// The evaluation-engine contract consumed by the explainer.
///
/// The program is treated as immutable for the duration of an explanation.
pub trait Program {
    fn relation(&self, name: &str) -> Option<&dyn Relation>;

    fn relations(&self) -> Box<dyn Iterator<Item = &dyn Relation> + '_>;

    fn symbols(&self) -> &dyn SymbolTable;

    /// The subproof capability for `(relation, rule_id)`, if the engine has one.
    fn subproof_routine(
        &self,
        relation: &str,
        rule_id: Domain,
    ) -> Option<Box<dyn SubproofRoutine + '_>>;
}
