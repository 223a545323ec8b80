use crate::error::EngineError;
use crate::record::{Domain, Witness};
use crate::traits::{Relation, SubproofRoutine};
use crate::PROVENANCE_COLUMNS;

use super::{Arg, Atom, Clause, MemoryProgram};

type Bindings = Vec<Option<Domain>>;

/// Subproof routine for one clause of a [`MemoryProgram`].
///
/// Positive body atoms are matched left to right against stored rows whose
/// level is strictly below the head's level, backtracking on failure.
/// Negated atoms are checked once every positive atom is bound; positions
/// still unbound at that point are reported as wildcards.
pub(crate) struct ClauseSubproof<'p> {
    program: &'p MemoryProgram,
    relation: &'p str,
    rule_id: Domain,
    clause: &'p Clause,
}

impl<'p> ClauseSubproof<'p> {
    pub(crate) fn new(
        program: &'p MemoryProgram,
        relation: &'p str,
        rule_id: Domain,
        clause: &'p Clause,
    ) -> Self {
        ClauseSubproof {
            program,
            relation,
            rule_id,
            clause,
        }
    }

    fn no_witness(&self) -> EngineError {
        EngineError::NoWitness {
            relation: self.relation.to_string(),
            rule_id: self.rule_id,
        }
    }

    /// Depth-first search over the positive atoms starting at `next`.
    /// `chosen` collects the matching row index of every positive atom.
    fn search(
        &self,
        positives: &[&Atom],
        next: usize,
        level: Domain,
        bindings: &Bindings,
        chosen: &mut Vec<usize>,
    ) -> Option<Bindings> {
        let Some(atom) = positives.get(next) else {
            return self.negations_hold(bindings).then(|| bindings.clone());
        };

        let rel = self.program.relation_at(atom.relation);
        let user = rel.arity() - PROVENANCE_COLUMNS;
        for (idx, row) in rel.rows().iter().enumerate() {
            if row[user + 1] >= level {
                continue;
            }
            let Some(extended) = unify(&atom.args, &row[..user], bindings) else {
                continue;
            };
            chosen.push(idx);
            if let Some(done) = self.search(positives, next + 1, level, &extended, chosen) {
                return Some(done);
            }
            chosen.pop();
        }
        None
    }

    fn negations_hold(&self, bindings: &Bindings) -> bool {
        self.clause
            .body
            .iter()
            .filter(|a| a.negated)
            .all(|atom| {
                let rel = self.program.relation_at(atom.relation);
                let user = rel.arity() - PROVENANCE_COLUMNS;
                !rel
                    .rows()
                    .iter()
                    .any(|row| matches_partially(&atom.args, &row[..user], bindings))
            })
    }
}

impl SubproofRoutine for ClauseSubproof<'_> {
    fn run(&self, input: &[Domain]) -> Result<Witness, EngineError> {
        let head_rel = self.program.relation_at(self.clause.head.relation);
        let user = head_rel.arity() - PROVENANCE_COLUMNS;
        if input.len() != user + 1 {
            return Err(EngineError::ArityMismatch {
                relation: self.relation.to_string(),
                expected: user + 1,
                got: input.len(),
            });
        }
        let level = input[user];

        let empty: Bindings = vec![None; self.clause.variables];
        let bindings =
            unify(&self.clause.head.args, &input[..user], &empty).ok_or_else(|| self.no_witness())?;

        let positives: Vec<&Atom> = self.clause.body.iter().filter(|a| !a.negated).collect();
        let mut chosen = Vec::with_capacity(positives.len());
        let bindings = self
            .search(&positives, 0, level, &bindings, &mut chosen)
            .ok_or_else(|| self.no_witness())?;

        let mut witness = Witness::new();
        let mut rows = chosen.into_iter();
        for atom in &self.clause.body {
            let rel = self.program.relation_at(atom.relation);
            if atom.negated {
                for arg in &atom.args {
                    match resolve(arg, &bindings) {
                        Some(v) => witness.push(v),
                        None => witness.push_wildcard(),
                    }
                }
                witness.push_wildcard();
                witness.push_wildcard();
            } else {
                let idx = rows.next().ok_or_else(|| self.no_witness())?;
                for &cell in &rel.rows()[idx] {
                    witness.push(cell);
                }
            }
        }
        Ok(witness)
    }
}

fn resolve(arg: &Arg, bindings: &Bindings) -> Option<Domain> {
    match *arg {
        Arg::Var(slot) => bindings[slot],
        Arg::Const(c) => Some(c),
        Arg::Anon => None,
    }
}

/// Extend `bindings` so that `args` matches `cells`, or `None` on conflict.
fn unify(args: &[Arg], cells: &[Domain], bindings: &Bindings) -> Option<Bindings> {
    let mut out = bindings.clone();
    for (arg, &cell) in args.iter().zip(cells) {
        match *arg {
            Arg::Anon => {}
            Arg::Const(c) if c != cell => return None,
            Arg::Const(_) => {}
            Arg::Var(slot) => match out[slot] {
                Some(bound) if bound != cell => return None,
                Some(_) => {}
                None => out[slot] = Some(cell),
            },
        }
    }
    Some(out)
}

/// Whether `cells` agrees with every bound position of `args`.
fn matches_partially(args: &[Arg], cells: &[Domain], bindings: &Bindings) -> bool {
    args.iter()
        .zip(cells)
        .all(|(arg, &cell)| resolve(arg, bindings).map_or(true, |v| v == cell))
}
