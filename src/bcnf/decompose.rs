use super::bcnf_violations;
use crate::{
    closure::closure,
    error::{Error, Result},
    AttributeSet, Fd, Relation,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecomposeConfig {
    /// Upper bound on the number of splits before giving up.
    pub max_splits: usize,
}

impl Default for DecomposeConfig {
    fn default() -> Self {
        Self { max_splits: 4096 }
    }
}

/// A relation visited by the decomposer.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) relation: Relation,
    /// The dependency the relation was split on, if it was split.
    pub(crate) violation: Option<Fd>,
    pub(crate) children: Vec<usize>,
}

/// Every relation the decomposer visited. A node's children always come
/// after it, and the root is the first node.
#[derive(Debug, Clone)]
pub(crate) struct Trace {
    pub(crate) nodes: Vec<Node>,
    /// BCNF nodes in depth-first order, determined side first.
    pub(crate) leaves: Vec<usize>,
}

impl Trace {
    fn into_relations(self) -> Vec<Relation> {
        let mut nodes: Vec<Option<Node>> = self.nodes.into_iter().map(Some).collect();
        let mut seen = BTreeSet::new();
        let mut ans = Vec::with_capacity(self.leaves.len());

        for id in self.leaves {
            if let Some(node) = nodes[id].take() {
                if seen.insert(node.relation.attributes.clone()) {
                    ans.push(node.relation);
                }
            }
        }
        ans
    }
}

/// Decompose `relation` into BCNF relations with the default configuration.
///
/// See [`bcnf_decompose_with`].
pub fn bcnf_decompose(relation: &Relation) -> Result<Vec<Relation>> {
    bcnf_decompose_with(relation, &DecomposeConfig::default())
}

/// Decompose `relation` into BCNF relations.
///
/// Relations are split on their first violating dependency `X -> Y` in
/// canonical order: one side is the closure of `X`, the other keeps `X` and
/// everything it does not determine. Each side carries the projection of the
/// dependencies onto it. Results are returned depth first with the
/// determined side first, and a relation appears once even if several
/// branches produce it.
///
/// A relation already in BCNF comes back unchanged as the only element.
pub fn bcnf_decompose_with(
    relation: &Relation,
    config: &DecomposeConfig,
) -> Result<Vec<Relation>> {
    let trace = run(relation, config)?;
    Ok(trace.into_relations())
}

pub(crate) fn run(relation: &Relation, config: &DecomposeConfig) -> Result<Trace> {
    let mut nodes = vec![Node {
        relation: relation.clone(),
        violation: None,
        children: vec![],
    }];
    let mut leaves = vec![];
    let mut stack = vec![0];
    let mut splits = 0;

    while let Some(id) = stack.pop() {
        let current = &nodes[id].relation;
        let violation = match bcnf_violations(&current.attributes, &current.fds).next() {
            Some(fd) => fd.clone(),
            None => {
                debug!("{} is in BCNF", current);
                leaves.push(id);
                continue;
            }
        };

        if splits == config.max_splits {
            return Err(Error::SplitLimitExceeded(config.max_splits));
        }
        splits += 1;

        let (determined, rest) = split(current, &violation)?;
        debug!(
            "split {} on {} into {} and {}",
            current.attributes, violation, determined, rest
        );
        let left = current.sub_relation(determined);
        let right = current.sub_relation(rest);

        let left_id = nodes.len();
        let right_id = left_id + 1;
        nodes.push(Node {
            relation: left,
            violation: None,
            children: vec![],
        });
        nodes.push(Node {
            relation: right,
            violation: None,
            children: vec![],
        });
        nodes[id].violation = Some(violation);
        nodes[id].children = vec![left_id, right_id];

        stack.push(right_id);
        stack.push(left_id);
    }

    Ok(Trace { nodes, leaves })
}

/// Split `relation` on `violation` into `X+` and `R - (X+ - X)`.
fn split(relation: &Relation, violation: &Fd) -> Result<(AttributeSet, AttributeSet)> {
    let attributes = &relation.attributes;
    let determined = &closure(&violation.lhs, &relation.fds) & attributes;
    let rest = attributes - &(&determined - &violation.lhs);

    if determined.len() >= attributes.len() || rest.len() >= attributes.len() {
        return Err(Error::NonTerminating {
            relation: attributes.clone(),
            violation: violation.clone(),
        });
    }
    Ok((determined, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        attrs, fd, fds,
        tests::{
            all_letters, assert_bcnf_decomposition, fd_set_strategy, FIXTURE_DECOMPOSITION,
            FIXTURE_RELATION,
        },
    };
    use proptest::prelude::*;

    #[test]
    fn test_bcnf_decompose() {
        let parts = bcnf_decompose(&FIXTURE_RELATION).unwrap();
        assert_eq!(*FIXTURE_DECOMPOSITION, parts);
        assert_bcnf_decomposition(&FIXTURE_RELATION, &parts);
    }

    #[test]
    fn test_bcnf_decompose_already_bcnf() {
        let r = Relation::new(attrs!(A B C), fds![A -> B C]).unwrap();
        assert_eq!(vec![r.clone()], bcnf_decompose(&r).unwrap());

        let r = Relation::new(attrs!(A B), fds![]).unwrap();
        assert_eq!(vec![r.clone()], bcnf_decompose(&r).unwrap());
    }

    #[test]
    fn test_bcnf_decompose_is_idempotent() {
        for part in bcnf_decompose(&FIXTURE_RELATION).unwrap() {
            assert_eq!(vec![part.clone()], bcnf_decompose(&part).unwrap());
        }
    }

    #[test]
    fn test_bcnf_decompose_multiple_levels() {
        let r = Relation::new(attrs!(A B C D), fds![A -> B, B -> C, C -> D]).unwrap();
        let parts = bcnf_decompose(&r).unwrap();
        assert_bcnf_decomposition(&r, &parts);
        assert_eq!(
            vec![attrs!(C D), attrs!(B C), attrs!(A B)],
            parts.into_iter().map(|p| p.attributes).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_bcnf_decompose_textbook() {
        let r = Relation::new(attrs!(A B C D), fds![A B -> C, C -> D, D -> A]).unwrap();
        let parts = bcnf_decompose(&r).unwrap();
        assert_bcnf_decomposition(&r, &parts);
    }

    #[test]
    fn test_split() {
        let r = &*FIXTURE_RELATION;
        let (determined, rest) = split(r, &fd!(A -> B)).unwrap();
        assert_eq!(attrs!(A B), determined);
        assert_eq!(attrs!(A C D), rest);

        assert_eq!(
            split(r, &fd!(C -> C)),
            Err(Error::NonTerminating {
                relation: attrs!(A B C D),
                violation: fd!(C -> C),
            })
        );
    }

    #[test]
    fn test_split_limit() {
        let config = DecomposeConfig { max_splits: 0 };
        assert_eq!(
            bcnf_decompose_with(&FIXTURE_RELATION, &config),
            Err(Error::SplitLimitExceeded(0))
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn test_bcnf_decompose_fuzzy(fds in fd_set_strategy()) {
            let r = Relation::new(all_letters(), fds).unwrap();
            let parts = bcnf_decompose(&r).unwrap();
            assert_bcnf_decomposition(&r, &parts);
        }
    }
}
