//! Evaluation-engine contract for provex.
//!
//! The explainer never evaluates rules itself. It reads relation contents,
//! resolves symbols, and asks the engine to recompute one rule's
//! justification through the traits defined here. [`MemoryProgram`] is an
//! in-memory engine implementing the contract over a JSON program dump.

mod error;
pub mod memory;
mod record;
mod traits;

pub use error::EngineError;
pub use memory::{Interner, MemoryProgram};
pub use record::{AttributeType, Domain, Tuple, Value, Witness};
pub use traits::{Program, Relation, SubproofRoutine, SymbolTable};

/// Marker that names the auxiliary rule-info relations.
pub const INFO_MARKER: &str = "@info";

/// Trailing rule-id and level columns carried by provenance relations.
pub const PROVENANCE_COLUMNS: usize = 2;

/// Prefix marking a negated body goal in rule-info rows.
pub const NEGATION_PREFIX: char = '!';
