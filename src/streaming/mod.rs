// Streaming engine: quality classification, candidate building, the
// opportunity optimizer, and recommendation ranking.

pub mod candidates;
pub mod optimizer;
pub mod quality;
pub mod recommend;
