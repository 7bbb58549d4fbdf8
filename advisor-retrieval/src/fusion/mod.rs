//! Score fusion: per-list min-max normalization, then a weighted sum with an
//! exact-overlap bonus.

pub mod normalize;
pub mod weighted;

pub use normalize::min_max;
pub use weighted::{fuse, overlap_score, FusedCandidate, FusionWeights};
