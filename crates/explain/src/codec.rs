//! Conversion between literal argument lists and raw engine tuples.

use provex_engine::{AttributeType, Domain, Program, Relation, Tuple, PROVENANCE_COLUMNS};

use crate::error::CodecError;

/// Placeholder rendered for cells the engine could not determine.
pub const WILDCARD: &str = "_";

/// Maps user-facing string arguments to and from a relation's typed tuple,
/// using the relation's attribute types and the engine's symbol table.
pub struct TupleCodec<'p, P: Program + ?Sized> {
    program: &'p P,
}

impl<'p, P: Program + ?Sized> TupleCodec<'p, P> {
    pub fn new(program: &'p P) -> Self {
        TupleCodec { program }
    }

    fn relation(&self, name: &str) -> Result<&'p dyn Relation, CodecError> {
        self.program
            .relation(name)
            .ok_or_else(|| CodecError::UnknownRelation {
                relation: name.to_string(),
            })
    }

    /// Encode literal arguments as the relation's user tuple.
    ///
    /// Symbols must already be interned; this never adds to the symbol table.
    /// Whether the tuple is actually stored is not checked here.
    pub fn args_to_tuple<S: AsRef<str>>(
        &self,
        relation: &str,
        args: &[S],
    ) -> Result<Tuple, CodecError> {
        let rel = self.relation(relation)?;
        let expected = rel.arity().saturating_sub(PROVENANCE_COLUMNS);
        if args.len() != expected {
            return Err(CodecError::ArityMismatch {
                relation: relation.to_string(),
                expected,
                got: args.len(),
            });
        }

        let symbols = self.program.symbols();
        let mut tuple = Vec::with_capacity(args.len());
        for (i, arg) in args.iter().enumerate() {
            let literal = arg.as_ref();
            let cell = match rel.attribute_type(i) {
                Some(AttributeType::Symbol) => {
                    symbols
                        .lookup_existing(literal)
                        .ok_or_else(|| CodecError::UnknownSymbol {
                            literal: literal.to_string(),
                        })?
                }
                _ => literal
                    .trim()
                    .parse::<Domain>()
                    .map_err(|_| CodecError::InvalidNumber {
                        literal: literal.to_string(),
                    })?,
            };
            tuple.push(cell);
        }
        Ok(tuple)
    }

    /// Decode a tuple prefix into literal arguments.
    ///
    /// Positions flagged in `wildcards` render as `_` without consulting the
    /// symbol table.
    pub fn tuple_to_args(
        &self,
        relation: &str,
        values: &[Domain],
        wildcards: Option<&[bool]>,
    ) -> Result<Vec<String>, CodecError> {
        let rel = self.relation(relation)?;
        if values.len() > rel.arity() {
            return Err(CodecError::ArityMismatch {
                relation: relation.to_string(),
                expected: rel.arity(),
                got: values.len(),
            });
        }

        let symbols = self.program.symbols();
        let mut args = Vec::with_capacity(values.len());
        for (i, &value) in values.iter().enumerate() {
            let wildcard = wildcards
                .and_then(|flags| flags.get(i))
                .copied()
                .unwrap_or(false);
            if wildcard {
                args.push(WILDCARD.to_string());
                continue;
            }
            match rel.attribute_type(i) {
                Some(AttributeType::Symbol) => {
                    let text = symbols
                        .resolve(value)
                        .ok_or(CodecError::UnknownSymbolId { id: value })?;
                    args.push(text.to_string());
                }
                _ => args.push(value.to_string()),
            }
        }
        Ok(args)
    }
}

/// `name(a1, a2, …)`
pub fn format_atom(name: &str, args: &[String]) -> String {
    format!("{}({})", name, args.join(", "))
}
