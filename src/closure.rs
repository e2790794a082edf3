use crate::{AttributeSet, Fd, FdSet};

/// Compute the closure of `attributes` under `fds`.
///
/// Dependencies are applied repeatedly until the result stops growing, so
/// chains such as `D -> B, B -> C` are followed regardless of the order in
/// which they are stored. Note that this differs from a single sweep over
/// the set, which only follows chains that happen to be stored in
/// application order.
pub fn closure(attributes: &AttributeSet, fds: &FdSet) -> AttributeSet {
    let mut ans = attributes.clone();
    let mut pending: Vec<&Fd> = fds.iter().collect();

    loop {
        let before = pending.len();
        pending.retain(|fd| {
            if fd.lhs.is_subset(&ans) {
                ans.extend(fd.rhs.iter().cloned());
                false
            } else {
                true
            }
        });

        if pending.len() == before {
            break;
        }
    }

    trace!("closure of {} is {}", attributes, ans);
    ans
}
