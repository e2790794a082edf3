mod basis;
mod key;
mod project;
mod prune;

pub use basis::minimal_basis;
pub use key::{candidate_keys, find_minimal_key, is_superkey};
pub use project::project;
pub use prune::prune_redundant;
