use crate::{closure::closure, utils::power_set, AttributeSet, Relation};

/// Whether `attributes` determines every attribute of `relation`.
pub fn is_superkey(attributes: &AttributeSet, relation: &Relation) -> bool {
    closure(attributes, &relation.fds).is_superset(&relation.attributes)
}

/// Reduce the full schema to one minimal key.
///
/// Attributes are visited once, in canonical order, and dropped whenever
/// the remainder is still a superkey. When a relation has several candidate
/// keys the visiting order decides which one is returned; use
/// [`candidate_keys`] to get all of them.
pub fn find_minimal_key(relation: &Relation) -> AttributeSet {
    let mut key = relation.attributes.clone();

    for a in relation.attributes.iter() {
        let reduced = key.without(a);
        if is_superkey(&reduced, relation) {
            key = reduced;
        }
    }

    debug!("minimal key of {} is {}", relation.attributes, key);
    key
}

/// All candidate keys of `relation`, smallest first.
pub fn candidate_keys(relation: &Relation) -> Vec<AttributeSet> {
    // Attributes that nothing determines belong to every key.
    let determined: AttributeSet = relation
        .fds
        .iter()
        .flat_map(|fd| &fd.rhs - &fd.lhs)
        .collect();
    let core = &relation.attributes - &determined;
    let optional = &relation.attributes - &core;

    let mut keys: Vec<AttributeSet> = Vec::new();
    for extra in power_set(&optional) {
        let candidate = &core | &extra;
        if keys.iter().any(|k| k.is_subset(&candidate)) {
            continue;
        }
        if is_superkey(&candidate, relation) {
            keys.push(candidate);
        }
    }
    keys
}
