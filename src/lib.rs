// relgraph: nearest-relative graph of popular subreddits.
//
// This is the library root. Each module corresponds to one stage of the
// pipeline: fetch commenters, build sets, score overlap, reduce, render.

pub mod config;
pub mod corpus;
pub mod output;
pub mod pipeline;
pub mod reddit;
pub mod relatedness;
