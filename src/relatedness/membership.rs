// Membership sets: the deduplicated commenters of each community.
//
// Deleted and removed authors arrive as `None` and are dropped here, so
// everything downstream only ever sees real author names.

use std::collections::{BTreeMap, HashSet};

/// Community name -> set of unique author names.
///
/// Ordered by community name so that scoring and reduction iterate
/// deterministically.
pub type MembershipSets = BTreeMap<String, HashSet<String>>;

/// Collapse one community's raw author sequence into a set.
///
/// Order is irrelevant; `None` entries are skipped. An all-`None` input
/// gives an empty set.
pub fn membership_set<I>(authors: I) -> HashSet<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    authors.into_iter().flatten().collect()
}

/// Build membership sets for every community.
///
/// If the same community name appears twice, its authors are merged.
pub fn build_membership_sets<I, A>(raw: I) -> MembershipSets
where
    I: IntoIterator<Item = (String, A)>,
    A: IntoIterator<Item = Option<String>>,
{
    let mut sets = MembershipSets::new();
    for (community, authors) in raw {
        sets.entry(community)
            .or_default()
            .extend(authors.into_iter().flatten());
    }
    sets
}
