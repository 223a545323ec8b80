//! In-memory reference engine.
//!
//! A `MemoryProgram` holds fully evaluated relations (every stored row
//! already carries its rule id and derivation level) together with the
//! clauses that produced them. It synthesizes one `<head>-@info-<id>`
//! relation per clause and answers subproof requests by searching the stored
//! rows, so it can stand in for a compiled engine in tests and in the CLI.

mod interner;
mod subproof;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::record::{AttributeType, Domain, Tuple, Value};
use crate::traits::{Program, Relation, SubproofRoutine, SymbolTable};
use crate::{INFO_MARKER, NEGATION_PREFIX, PROVENANCE_COLUMNS};

pub use interner::Interner;
use subproof::ClauseSubproof;

// ──────────────────────────────────────────────
// Program description (JSON)
// ──────────────────────────────────────────────

/// Top-level JSON description of an evaluated program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramSpec {
    #[serde(default)]
    pub relations: Vec<RelationSpec>,
    #[serde(default)]
    pub clauses: Vec<ClauseSpec>,
}

/// A declared relation and its evaluated contents.
///
/// `attributes` lists the user columns only. Each row in `tuples` must carry
/// the user cells followed by the rule id and the level, except for
/// relations named with the `@info` marker, which are stored as declared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationSpec {
    pub name: String,
    pub attributes: Vec<AttributeType>,
    #[serde(default)]
    pub tuples: Vec<Vec<Value>>,
}

/// A rule `head :- body.`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseSpec {
    pub head: AtomSpec,
    #[serde(default)]
    pub body: Vec<AtomSpec>,
    /// Source text; rendered from the atoms when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomSpec {
    pub relation: String,
    #[serde(default)]
    pub negated: bool,
    #[serde(default)]
    pub args: Vec<Term>,
}

/// An atom argument: a JSON string is a variable (`_` is anonymous),
/// `{"const": …}` is a constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Term {
    Var(String),
    Const {
        #[serde(rename = "const")]
        value: Value,
    },
}

impl fmt::Display for AtomSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{}", NEGATION_PREFIX)?;
        }
        write!(f, "{}(", self.relation)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match arg {
                Term::Var(name) => write!(f, "{}", name)?,
                Term::Const {
                    value: Value::Symbol(s),
                } => write!(f, "\"{}\"", s)?,
                Term::Const {
                    value: Value::Number(n),
                } => write!(f, "{}", n)?,
            }
        }
        write!(f, ")")
    }
}

impl ClauseSpec {
    fn render(&self) -> String {
        if self.body.is_empty() {
            return format!("{}.", self.head);
        }
        let body: Vec<String> = self.body.iter().map(|a| a.to_string()).collect();
        format!("{} :- {}.", self.head, body.join(", "))
    }
}

// ──────────────────────────────────────────────
// Stored relations
// ──────────────────────────────────────────────

/// A relation held in memory.
///
/// Rows are kept twice: as typed cells for iteration through [`Relation`],
/// and as raw interned tuples for the subproof search.
#[derive(Debug, Clone)]
pub struct MemoryRelation {
    name: String,
    attributes: Vec<AttributeType>,
    cells: Vec<Vec<Value>>,
    rows: Vec<Tuple>,
}

impl MemoryRelation {
    pub(crate) fn rows(&self) -> &[Tuple] {
        &self.rows
    }
}

impl Relation for MemoryRelation {
    fn name(&self) -> &str {
        &self.name
    }

    fn arity(&self) -> usize {
        self.attributes.len()
    }

    fn attribute_type(&self, i: usize) -> Option<AttributeType> {
        self.attributes.get(i).copied()
    }

    fn tuples(&self) -> Box<dyn Iterator<Item = Vec<Value>> + '_> {
        Box::new(self.cells.iter().cloned())
    }
}

// ──────────────────────────────────────────────
// Compiled clauses
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arg {
    Var(usize),
    Anon,
    Const(Domain),
}

#[derive(Debug, Clone)]
pub(crate) struct Atom {
    pub(crate) relation: usize,
    pub(crate) negated: bool,
    pub(crate) args: Vec<Arg>,
}

#[derive(Debug, Clone)]
pub(crate) struct Clause {
    pub(crate) head: Atom,
    pub(crate) body: Vec<Atom>,
    pub(crate) variables: usize,
}

// ──────────────────────────────────────────────
// MemoryProgram
// ──────────────────────────────────────────────

/// An evaluated program held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryProgram {
    relations: Vec<MemoryRelation>,
    by_name: HashMap<String, usize>,
    clauses: HashMap<(String, Domain), Clause>,
    symbols: Interner,
}

impl MemoryProgram {
    /// Parse a JSON program description.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let spec: ProgramSpec = serde_json::from_str(json)?;
        Self::from_spec(spec)
    }

    pub fn from_json_value(json: serde_json::Value) -> Result<Self, EngineError> {
        let spec: ProgramSpec = serde_json::from_value(json)?;
        Self::from_spec(spec)
    }

    /// Validate and load a program description.
    ///
    /// Relations are registered first, then each clause is compiled and
    /// given its info relation. Clauses are numbered per head relation from
    /// 1 in declaration order; rule id 0 is reserved for base facts.
    pub fn from_spec(spec: ProgramSpec) -> Result<Self, EngineError> {
        let mut program = MemoryProgram::default();

        for rel in &spec.relations {
            program.load_relation(rel)?;
        }

        let mut next_id: HashMap<String, Domain> = HashMap::new();
        for clause in &spec.clauses {
            let id = next_id.entry(clause.head.relation.clone()).or_insert(0);
            *id += 1;
            let rule_id = *id;
            program.load_clause(clause, rule_id)?;
        }

        Ok(program)
    }

    fn register(&mut self, relation: MemoryRelation) -> Result<usize, EngineError> {
        if self.by_name.contains_key(&relation.name) {
            return Err(EngineError::DuplicateRelation {
                name: relation.name,
            });
        }
        let idx = self.relations.len();
        self.by_name.insert(relation.name.clone(), idx);
        self.relations.push(relation);
        Ok(idx)
    }

    fn load_relation(&mut self, spec: &RelationSpec) -> Result<(), EngineError> {
        let mut attributes = spec.attributes.clone();
        if !spec.name.contains(INFO_MARKER) {
            attributes.extend([AttributeType::Number; PROVENANCE_COLUMNS]);
        }

        let mut rows = Vec::with_capacity(spec.tuples.len());
        for cells in &spec.tuples {
            if cells.len() != attributes.len() {
                return Err(EngineError::ArityMismatch {
                    relation: spec.name.clone(),
                    expected: attributes.len(),
                    got: cells.len(),
                });
            }
            let mut row = Vec::with_capacity(cells.len());
            for (column, (cell, ty)) in cells.iter().zip(&attributes).enumerate() {
                row.push(self.encode(&spec.name, column, cell, *ty)?);
            }
            rows.push(row);
        }

        self.register(MemoryRelation {
            name: spec.name.clone(),
            attributes,
            cells: spec.tuples.clone(),
            rows,
        })?;
        Ok(())
    }

    fn encode(
        &mut self,
        relation: &str,
        column: usize,
        cell: &Value,
        ty: AttributeType,
    ) -> Result<Domain, EngineError> {
        match (cell, ty) {
            (Value::Number(n), AttributeType::Number) => Ok(*n),
            (Value::Symbol(s), AttributeType::Symbol) => self.symbols.intern(s),
            _ => Err(EngineError::TypeMismatch {
                relation: relation.to_string(),
                column,
                expected: ty.to_string(),
            }),
        }
    }

    fn load_clause(&mut self, spec: &ClauseSpec, rule_id: Domain) -> Result<(), EngineError> {
        let mut variables = HashMap::new();
        let head = self.compile_atom(&spec.head, &mut variables)?;
        let mut body = Vec::with_capacity(spec.body.len());
        for atom in &spec.body {
            body.push(self.compile_atom(atom, &mut variables)?);
        }

        let text = spec.text.clone().unwrap_or_else(|| spec.render());
        let goal_names: Vec<String> = spec
            .body
            .iter()
            .map(|a| {
                if a.negated {
                    format!("{}{}", NEGATION_PREFIX, a.relation)
                } else {
                    a.relation.clone()
                }
            })
            .collect();

        // Info row layout: rule id, body goal names, rule text.
        let mut attributes = vec![AttributeType::Number];
        let mut cells = vec![Value::Number(rule_id)];
        let mut row = vec![rule_id];
        for name in goal_names.iter().chain(std::iter::once(&text)) {
            attributes.push(AttributeType::Symbol);
            cells.push(Value::Symbol(name.clone()));
            row.push(self.symbols.intern(name)?);
        }

        self.register(MemoryRelation {
            name: format!("{}-{}-{}", spec.head.relation, INFO_MARKER, rule_id),
            attributes,
            cells: vec![cells],
            rows: vec![row],
        })?;

        self.clauses.insert(
            (spec.head.relation.clone(), rule_id),
            Clause {
                head,
                body,
                variables: variables.len(),
            },
        );
        Ok(())
    }

    fn compile_atom(
        &mut self,
        spec: &AtomSpec,
        variables: &mut HashMap<String, usize>,
    ) -> Result<Atom, EngineError> {
        let relation =
            *self
                .by_name
                .get(&spec.relation)
                .ok_or_else(|| EngineError::UnknownRelation {
                    name: spec.relation.clone(),
                })?;
        if spec.relation.contains(INFO_MARKER) {
            return Err(EngineError::InfoRelationInClause {
                name: spec.relation.clone(),
            });
        }
        let arity = self.relations[relation].arity() - PROVENANCE_COLUMNS;
        if spec.args.len() != arity {
            return Err(EngineError::ArityMismatch {
                relation: spec.relation.clone(),
                expected: arity,
                got: spec.args.len(),
            });
        }

        let mut args = Vec::with_capacity(spec.args.len());
        for (column, term) in spec.args.iter().enumerate() {
            let arg = match term {
                Term::Var(name) if name == "_" => Arg::Anon,
                Term::Var(name) => {
                    let next = variables.len();
                    Arg::Var(*variables.entry(name.clone()).or_insert(next))
                }
                Term::Const { value } => {
                    let ty = self.relations[relation].attributes[column];
                    Arg::Const(self.encode(&spec.relation, column, value, ty)?)
                }
            };
            args.push(arg);
        }

        Ok(Atom {
            relation,
            negated: spec.negated,
            args,
        })
    }

    pub(crate) fn relation_at(&self, idx: usize) -> &MemoryRelation {
        &self.relations[idx]
    }

    /// The program's symbol table.
    pub fn interner(&self) -> &Interner {
        &self.symbols
    }

    /// Number of loaded clauses.
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }
}

impl Program for MemoryProgram {
    fn relation(&self, name: &str) -> Option<&dyn Relation> {
        self.by_name
            .get(name)
            .map(|&i| &self.relations[i] as &dyn Relation)
    }

    fn relations(&self) -> Box<dyn Iterator<Item = &dyn Relation> + '_> {
        Box::new(self.relations.iter().map(|r| r as &dyn Relation))
    }

    fn symbols(&self) -> &dyn SymbolTable {
        &self.symbols
    }

    fn subproof_routine(
        &self,
        relation: &str,
        rule_id: Domain,
    ) -> Option<Box<dyn SubproofRoutine + '_>> {
        let ((name, _), clause) = self.clauses.get_key_value(&(relation.to_string(), rule_id))?;
        Some(Box::new(ClauseSubproof::new(self, name.as_str(), rule_id, clause)))
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
