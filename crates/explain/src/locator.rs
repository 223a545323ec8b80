//! Locating the stored derivation of a tuple.

use provex_engine::{Domain, Program, Value, PROVENANCE_COLUMNS};

/// Rule id and level recorded for a stored tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Derivation {
    pub rule_id: Domain,
    pub level: Domain,
}

/// Finds the derivation that justifies a concrete tuple.
///
/// The scan is linear over the relation's extension and the first matching
/// row wins: if a tuple was derived more than once, only the first stored
/// derivation is ever explained.
pub struct TupleLocator<'p, P: Program + ?Sized> {
    program: &'p P,
}

impl<'p, P: Program + ?Sized> TupleLocator<'p, P> {
    pub fn new(program: &'p P) -> Self {
        TupleLocator { program }
    }

    /// `None` if the relation is unknown or no stored row matches `values`.
    pub fn find_derivation(&self, relation: &str, values: &[Domain]) -> Option<Derivation> {
        let rel = self.program.relation(relation)?;
        let user = rel.arity().checked_sub(PROVENANCE_COLUMNS)?;
        let symbols = self.program.symbols();

        for row in rel.tuples() {
            if row.len() < user + PROVENANCE_COLUMNS {
                continue;
            }

            let matched = (0..user).all(|i| {
                let cell = match &row[i] {
                    Value::Symbol(s) => symbols.lookup_existing(s),
                    Value::Number(n) => Some(*n),
                };
                cell.is_some() && cell == values.get(i).copied()
            });
            if !matched {
                continue;
            }

            if let (Some(rule_id), Some(level)) = (row[user].as_number(), row[user + 1].as_number())
            {
                return Some(Derivation { rule_id, level });
            }
        }

        None
    }
}
