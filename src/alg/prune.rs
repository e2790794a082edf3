use crate::{Fd, FdSet};
use std::cmp::Reverse;

/// Remove dependencies that follow from the others.
///
/// Three sweeps are applied in order:
/// 1. a dependency is dropped when another one with the same rhs has a
///    strictly smaller lhs;
/// 2. `X -> Z` is dropped while both `X -> Y` and `Y -> Z` are present;
/// 3. any dependency still implied by the remaining ones is dropped.
///
/// Sweeps 2 and 3 remove one dependency at a time and re-check against the
/// current set, so mutually derivable dependencies (e.g. a cycle
/// `A -> B, B -> C, C -> A` with its shortcuts) never all vanish together.
/// The result is equivalent to the input and irredundant.
pub fn prune_redundant(fds: FdSet) -> FdSet {
    let fds = drop_dominated(fds);
    let fds = drop_transitive(fds);
    drop_implied(fds)
}

fn drop_dominated(mut fds: FdSet) -> FdSet {
    let dominated: Vec<Fd> = fds
        .iter()
        .filter(|fd| {
            fds.iter().any(|other| {
                other.rhs == fd.rhs && other.lhs != fd.lhs && other.lhs.is_subset(&fd.lhs)
            })
        })
        .cloned()
        .collect();

    for fd in dominated {
        trace!("drop {}: a smaller lhs determines the same rhs", fd);
        fds.remove(&fd);
    }
    fds
}

fn drop_transitive(mut fds: FdSet) -> FdSet {
    let candidates: Vec<Fd> = fds.iter().cloned().collect();

    for fd in candidates {
        let derivable = fds.iter().any(|first| {
            first != &fd
                && first.lhs == fd.lhs
                && fds.iter().any(|second| {
                    second != &fd && second.lhs == first.rhs && second.rhs == fd.rhs
                })
        });

        if derivable {
            trace!("drop {}: transitively implied", fd);
            fds.remove(&fd);
        }
    }
    fds
}

fn drop_implied(mut fds: FdSet) -> FdSet {
    // Wider determinants are tried first.
    let mut candidates: Vec<Fd> = fds.iter().cloned().collect();
    candidates.sort_by_key(|fd| Reverse(fd.lhs.len()));

    for fd in candidates {
        let rest = fds.without(&fd);
        if rest.implies(&fd) {
            trace!("drop {}: implied by the rest", fd);
            fds = rest;
        }
    }
    fds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fds;

    #[test]
    fn test_drop_dominated() {
        let fds = fds![A -> C, A B -> C, A B D -> C, B -> D];
        assert_eq!(fds![A -> C, B -> D], drop_dominated(fds));
    }

    #[test]
    fn test_drop_transitive() {
        let fds = fds![A -> B, B -> C, A -> C];
        assert_eq!(fds![A -> B, B -> C], drop_transitive(fds));
    }

    #[test]
    fn test_cycle_keeps_equivalence() {
        let fds = fds![A -> B, A -> C, B -> A, B -> C, C -> A, C -> B];
        let pruned = prune_redundant(fds.clone());
        assert!(pruned.is_equivalent(&fds));
        assert!(pruned.len() < fds.len());
        for fd in pruned.iter() {
            assert!(!pruned.without(fd).implies(fd));
        }
    }

    #[test]
    fn test_drop_implied() {
        // Not caught by the first two sweeps: A -> D follows from A -> B, A -> C, B C -> D.
        let fds = fds![A -> B, A -> C, B C -> D, A -> D];
        assert_eq!(fds![A -> B, A -> C, B C -> D], prune_redundant(fds));
    }

    #[test]
    fn test_trivial_dropped() {
        let fds = fds![A -> A, A -> B];
        assert_eq!(fds![A -> B], prune_redundant(fds));
    }
}
