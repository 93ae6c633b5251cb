pub mod enrich;
pub mod factors;
pub mod indicators;
pub mod rng;
pub mod scoring;

pub use enrich::{Enrich, MockEnricher};
pub use rng::Rng;
pub use scoring::{account_id, normalize_handle, score, verify};
