//! Derivation proof trees for provenance-instrumented Datalog programs.
//!
//! Given a fact of an evaluated program, [`Explainer`] reconstructs why it
//! holds: the rule that derived it and, recursively, the sub-facts that rule
//! used, down to base facts. The program is reached only through the
//! `provex_engine` contract.
//!
//! ```ignore
//! let program = provex_engine::MemoryProgram::from_json_str(&json)?;
//! let mut explainer = provex_explain::Explainer::new(&program)?;
//! let tree = explainer.explain("path", &["a", "c"], 4)?;
//! ```

pub mod cache;
pub mod codec;
pub mod config;
pub mod error;
pub mod explainer;
pub mod locator;
pub mod rules;
pub mod tree;

pub use cache::SubproofCache;
pub use codec::TupleCodec;
pub use config::{ExplainConfig, DEFAULT_DEPTH_LIMIT};
pub use error::{CodecError, ExplainError};
pub use explainer::{Explainer, RELATION_NOT_FOUND, SUBPROOF_NOT_FOUND, TUPLE_NOT_FOUND};
pub use locator::{Derivation, TupleLocator};
pub use rules::{BodyGoal, RuleIndex, RuleInfo};
pub use tree::TreeNode;
