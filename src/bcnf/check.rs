use crate::{closure::closure, AttributeSet, Fd, FdSet};

/// Whether `fd` respects BCNF in the relation `attributes` under `fds`:
/// either it is trivial or its lhs is a superkey.
pub fn satisfies_bcnf(fd: &Fd, fds: &FdSet, attributes: &AttributeSet) -> bool {
    fd.is_trivial() || closure(&fd.lhs, fds).is_superset(attributes)
}

/// Whether every dependency of `fds` respects BCNF in `attributes`.
pub fn is_decomposed(attributes: &AttributeSet, fds: &FdSet) -> bool {
    bcnf_violations(attributes, fds).next().is_none()
}

/// Dependencies violating BCNF, in canonical order.
pub fn bcnf_violations<'a>(
    attributes: &'a AttributeSet,
    fds: &'a FdSet,
) -> impl Iterator<Item = &'a Fd> + 'a {
    fds.iter()
        .filter(move |fd| !satisfies_bcnf(fd, fds, attributes))
}
