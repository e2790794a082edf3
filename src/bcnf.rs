mod check;
mod decompose;
mod tree;

pub use check::{bcnf_violations, is_decomposed, satisfies_bcnf};
pub use decompose::{bcnf_decompose, bcnf_decompose_with, DecomposeConfig};
pub use tree::{bcnf_decompose_tree, DecompositionTree};
