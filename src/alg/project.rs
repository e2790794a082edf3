use super::prune_redundant;
use crate::{closure::closure, utils::power_set, AttributeSet, Fd, FdSet};
use rayon::prelude::*;
use std::collections::BTreeSet;

/// Project `fds` onto `attributes`.
///
/// Every non-empty subset `X` of `attributes` contributes `X -> a` for each
/// `a` in its closure that lies in `attributes` but not in `X`. Redundant
/// candidates are then pruned (see [`prune_redundant`]), so the result only
/// holds non-trivial dependencies over `attributes`.
pub fn project(attributes: &AttributeSet, fds: &FdSet) -> FdSet {
    let candidates: BTreeSet<Fd> = power_set(attributes)
        .into_par_iter()
        .filter(|x| !x.is_empty())
        .flat_map(|x| {
            let determined = &(&closure(&x, fds) & attributes) - &x;
            determined
                .into_iter()
                .map(|a| Fd::single(x.clone(), a))
                .collect::<Vec<_>>()
        })
        .collect();

    debug!(
        "{} candidate dependencies over {}",
        candidates.len(),
        attributes
    );
    prune_redundant(candidates.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        attrs, fds,
        tests::{assert_projection, fd_set_strategy, Letters, FIXTURE_RELATION},
    };
    use proptest::prelude::*;

    #[test]
    fn test_project() {
        let fds = &FIXTURE_RELATION.fds;
        assert_eq!(fds![A -> B], project(&attrs!(A B D), fds));
        assert_eq!(fds![A C -> D], project(&attrs!(A C D), fds));
        assert_eq!(fds![], project(&attrs!(C D), fds));
    }

    #[test]
    fn test_project_without_transitive_shortcuts() {
        let fds = fds![A -> B, B -> D];
        let projected = project(&attrs!(A B D), &fds);
        assert_eq!(fds![A -> B, B -> D], projected);
        assert!(!projected.contains(&crate::fd!(A -> D)));
    }

    #[test]
    fn test_project_through_hidden_attribute() {
        // B is projected away, but A -> C still holds through it.
        let fds = fds![A -> B, B -> C];
        assert_eq!(fds![A -> C], project(&attrs!(A C), &fds));
    }

    #[test]
    fn test_project_non_trivial() {
        let fds = fds![A B -> C, C -> A, C D -> B];
        let target = attrs!(A B C D);
        let projected = project(&target, &fds);
        assert!(projected.is_equivalent(&fds));
        for fd in projected.iter() {
            assert!(!fd.lhs.is_empty());
            assert!(!fd.is_trivial());
            assert!(fd.attributes().is_subset(&target));
        }
    }

    #[test]
    fn test_project_keeps_cycles() {
        let fds = fds![A -> B, B -> C, C -> A];
        let target = attrs!(A B C);
        assert_projection(&target, &fds, &project(&target, &fds));
    }

    proptest! {
        #[test]
        fn test_project_fuzzy(target in any::<Letters>(), fds in fd_set_strategy()) {
            let target = target.into_attribute_set();
            assert_projection(&target, &fds, &project(&target, &fds));
        }
    }
}
