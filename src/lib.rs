//! Functional dependencies and relational normalization: attribute closures,
//! keys, projections, minimal bases and BCNF decomposition.

#[macro_use]
extern crate tracing;

pub mod alg;
pub mod attribute;
pub mod bcnf;
pub mod closure;
pub mod error;
pub mod fd;
pub mod relation;
pub mod utils;


pub use alg::{
    candidate_keys, find_minimal_key, is_superkey, minimal_basis, project, prune_redundant,
};
pub use attribute::{Attribute, AttributeSet, Notation};
pub use bcnf::{
    bcnf_decompose, bcnf_decompose_tree, bcnf_decompose_with, bcnf_violations, is_decomposed,
    satisfies_bcnf, DecomposeConfig, DecompositionTree,
};
pub use closure::closure;
pub use error::{Error, InvalidInput};
pub use fd::{Fd, FdSet};
pub use relation::Relation;
pub use utils::power_set;
