use std::fmt;

use serde::{Deserialize, Serialize};

/// The engine's cell type. Symbols are stored as their interned id.
pub type Domain = i32;

/// An ordered, fixed-length sequence of raw cells.
pub type Tuple = Vec<Domain>;

/// Attribute type tag of a relation column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    Symbol,
    Number,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::Symbol => write!(f, "symbol"),
            AttributeType::Number => write!(f, "number"),
        }
    }
}

/// A typed cell as yielded by relation iteration.
///
/// Symbolic columns come back as their text, not their interned id; callers
/// comparing against raw tuples go through the symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(Domain),
    Symbol(String),
}

impl Value {
    pub fn as_number(&self) -> Option<Domain> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Symbol(_) => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(s) => Some(s),
            Value::Number(_) => None,
        }
    }

    /// Whether this cell is acceptable in a column of type `ty`.
    pub fn fits(&self, ty: AttributeType) -> bool {
        matches!(
            (self, ty),
            (Value::Number(_), AttributeType::Number) | (Value::Symbol(_), AttributeType::Symbol)
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Symbol(s) => write!(f, "{}", s),
        }
    }
}

/// Output of a subproof routine.
///
/// `values` holds, for every body goal in rule order, the goal's user cells
/// followed by its rule id and level. `wildcards` runs parallel to `values`
/// and marks cells the engine could not determine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Witness {
    pub values: Vec<Domain>,
    pub wildcards: Vec<bool>,
}

impl Witness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a concrete cell.
    pub fn push(&mut self, value: Domain) {
        self.values.push(value);
        self.wildcards.push(false);
    }

    /// Append a cell the engine cannot supply.
    pub fn push_wildcard(&mut self) {
        self.values.push(0);
        self.wildcards.push(true);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_deserializes_untagged() {
        let cells: Vec<Value> = serde_json::from_str(r#"["a", 3, "b"]"#).unwrap();
        assert_eq!(
            cells,
            vec![
                Value::Symbol("a".to_string()),
                Value::Number(3),
                Value::Symbol("b".to_string())
            ]
        );
    }

    #[test]
    fn value_fits_column_type() {
        assert!(Value::Number(1).fits(AttributeType::Number));
        assert!(!Value::Number(1).fits(AttributeType::Symbol));
        assert!(Value::Symbol("x".into()).fits(AttributeType::Symbol));
    }

    #[test]
    fn witness_keeps_flags_parallel() {
        let mut w = Witness::new();
        w.push(4);
        w.push_wildcard();
        assert_eq!(w.values, vec![4, 0]);
        assert_eq!(w.wildcards, vec![false, true]);
        assert_eq!(w.len(), 2);
    }
}
