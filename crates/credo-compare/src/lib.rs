pub mod engine;
pub mod similarity;

pub use engine::compare;
pub use similarity::{estimate_common_followers, pair_similarity, parse_follower_count};
