use std::collections::{BTreeMap, BTreeSet};

use crate::graph::RelationMap;

/// Merge per-document relation maps into one corpus-wide map.
///
/// Dependencies are unioned as sets, so the merge is commutative and
/// idempotent with respect to the dependency sets; list order inside each
/// entry is not preserved across merges (the result is sorted).
pub fn merge_relations(all_relations: &[RelationMap]) -> RelationMap {
    let mut merged: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for relations in all_relations {
        for (entity, deps) in relations {
            merged
                .entry(entity.clone())
                .or_default()
                .extend(deps.iter().cloned());
        }
    }

    merged
        .into_iter()
        .map(|(entity, deps)| (entity, deps.into_iter().collect()))
        .collect()
}
