use super::prune_redundant;
use crate::{closure::closure, utils::proper_subsets, Fd, FdSet};

/// Compute a minimal basis (canonical cover) of `fds`.
///
/// 1. Composite right-hand sides are split into one dependency per attribute.
/// 2. Each composite lhs is replaced by its smallest subset whose closure
///    still contains the rhs.
/// 3. Redundant dependencies are pruned with [`prune_redundant`].
///
/// The result is equivalent to `fds`, has singleton right-hand sides, and
/// neither a dependency nor an lhs attribute can be removed from it without
/// losing equivalence.
pub fn minimal_basis(fds: &FdSet) -> FdSet {
    let split = fds.split_rhs();
    let mut reduced = split.clone();

    for fd in split.iter().filter(|fd| fd.lhs.len() > 1) {
        let smaller =
            proper_subsets(&fd.lhs).find(|lhs| fd.rhs.is_subset(&closure(lhs, &reduced)));
        if let Some(lhs) = smaller {
            let replacement = Fd::new(lhs, fd.rhs.clone());
            debug!("reduce {} to {}", fd, replacement);
            reduced.remove(fd);
            reduced.insert(replacement);
        }
    }

    prune_redundant(reduced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fds,
        tests::{assert_minimal_basis, fd_set_strategy},
    };
    use proptest::prelude::*;

    #[test]
    fn test_minimal_basis() {
        let fds = fds![A -> B C, B -> C, A -> B, A B -> C];
        let basis = minimal_basis(&fds);
        assert_eq!(fds![A -> B, B -> C], basis);
        assert_minimal_basis(&fds, &basis);
    }

    #[test]
    fn test_minimal_basis_reduces_lhs() {
        let fds = fds![A B -> C, A -> B];
        assert_eq!(fds![A -> B, A -> C], minimal_basis(&fds));

        let fds = fds![A B C -> D, A -> B, B -> C];
        assert_eq!(fds![A -> B, A -> D, B -> C], minimal_basis(&fds));
    }

    #[test]
    fn test_minimal_basis_textbook() {
        let fds = fds![A B -> C, C -> D, D -> A];
        let basis = minimal_basis(&fds);
        assert_eq!(fds, basis);
        assert_minimal_basis(&fds, &basis);

        let fds = fds![A -> B C, B -> A C, C -> A B];
        assert_minimal_basis(&fds, &minimal_basis(&fds));
    }

    #[test]
    fn test_minimal_basis_already_minimal() {
        let fds = fds![A -> B, B C -> D];
        assert_eq!(fds, minimal_basis(&fds));
    }

    proptest! {
        #[test]
        fn test_minimal_basis_fuzzy(fds in fd_set_strategy()) {
            let basis = minimal_basis(&fds);
            assert_minimal_basis(&fds, &basis);
        }
    }
}
