// Relatedness computation — membership sets, pairwise overlap, reduction.
//
// Pure functions only: no network, no filesystem. Each submodule is one
// stage of the pipeline, applied in order.

pub mod membership;
pub mod nearest;
pub mod overlap;

pub use membership::MembershipSets;
pub use nearest::{NearestRelative, RelatednessGraph};
pub use overlap::RelatednessMatrix;

/// Score and reduce membership sets into the nearest-relative graph.
///
/// Every community in `sets` is a node of the result.
pub fn relatedness_graph(sets: &MembershipSets) -> RelatednessGraph {
    let matrix = overlap::score_pairs(sets);
    nearest::reduce_to_nearest(&matrix, sets.keys())
}
